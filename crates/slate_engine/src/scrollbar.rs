//! Scrollbar geometry
//!
//! The interaction engine hit-tests thumbs and tracks with exactly the same
//! math the interpreter draws them with; keeping both on this module is
//! what makes a grabbed thumb stay under the pointer.

use crate::layout::ScrollContainerInfo;
use slate_core::{Rect, Vec2};

/// Track thickness in logical units
pub const SCROLLBAR_SIZE: f32 = 10.0;

/// Minimum thumb length, keeps tiny ratios grabbable
pub const MIN_THUMB_LENGTH: f32 = SCROLLBAR_SIZE * 2.0;

/// Track and thumb rectangles for one axis of one container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarGeometry {
    pub track: Rect,
    pub thumb: Rect,
}

/// Vertical scrollbar geometry, `None` when the axis has nothing to scroll
pub fn vertical(bounds: Rect, info: &ScrollContainerInfo, offset: Vec2) -> Option<ScrollbarGeometry> {
    let viewport = info.viewport.height;
    let content = info.content.height;
    if viewport <= 0.0 || content <= viewport {
        return None;
    }

    let track = Rect::new(
        bounds.x + bounds.width - SCROLLBAR_SIZE,
        bounds.y,
        SCROLLBAR_SIZE,
        bounds.height,
    );

    let thumb_len = ((viewport / content) * track.height).max(MIN_THUMB_LENGTH);
    let progress = (-offset.y / (content - viewport)).clamp(0.0, 1.0);
    let travel = (track.height - thumb_len).max(0.0);
    let thumb = Rect::new(track.x, track.y + progress * travel, SCROLLBAR_SIZE, thumb_len);

    Some(ScrollbarGeometry { track, thumb })
}

/// Horizontal scrollbar geometry, `None` when the axis has nothing to scroll
pub fn horizontal(
    bounds: Rect,
    info: &ScrollContainerInfo,
    offset: Vec2,
) -> Option<ScrollbarGeometry> {
    let viewport = info.viewport.width;
    let content = info.content.width;
    if viewport <= 0.0 || content <= viewport {
        return None;
    }

    let track = Rect::new(
        bounds.x,
        bounds.y + bounds.height - SCROLLBAR_SIZE,
        bounds.width,
        SCROLLBAR_SIZE,
    );

    let thumb_len = ((viewport / content) * track.width).max(MIN_THUMB_LENGTH);
    let progress = (-offset.x / (content - viewport)).clamp(0.0, 1.0);
    let travel = (track.width - thumb_len).max(0.0);
    let thumb = Rect::new(track.x + progress * travel, track.y, thumb_len, SCROLLBAR_SIZE);

    Some(ScrollbarGeometry { track, thumb })
}

/// Offset for a click on the track outside the thumb: the thumb centers on
/// the click, proportionally mapped onto the scroll range.
pub fn page_jump_offset(click: f32, track_start: f32, track_len: f32, thumb_len: f32, max_scroll: f32) -> f32 {
    let travel = track_len - thumb_len;
    if travel <= 0.0 || max_scroll <= 0.0 {
        return 0.0;
    }
    let ratio = ((click - track_start - thumb_len / 2.0) / travel).clamp(0.0, 1.0);
    -ratio * max_scroll
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_core::{Dimensions, ScrollAxes};

    fn info(viewport: (f32, f32), content: (f32, f32)) -> ScrollContainerInfo {
        ScrollContainerInfo {
            viewport: Dimensions::new(viewport.0, viewport.1),
            content: Dimensions::new(content.0, content.1),
            axes: ScrollAxes {
                vertical: true,
                horizontal: true,
            },
        }
    }

    #[test]
    fn test_vertical_geometry_at_top() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 400.0);
        let geom = vertical(bounds, &info((200.0, 400.0), (200.0, 1000.0)), Vec2::ZERO).unwrap();
        assert_eq!(geom.track.x, 190.0);
        assert_eq!(geom.track.height, 400.0);
        // Thumb proportional to viewport/content ratio
        assert_eq!(geom.thumb.height, 160.0);
        assert_eq!(geom.thumb.y, 0.0);
    }

    #[test]
    fn test_thumb_moves_with_offset() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 400.0);
        let at_top = vertical(bounds, &info((200.0, 400.0), (200.0, 1000.0)), Vec2::ZERO).unwrap();
        let at_half = vertical(
            bounds,
            &info((200.0, 400.0), (200.0, 1000.0)),
            Vec2::new(0.0, -300.0),
        )
        .unwrap();
        let at_end = vertical(
            bounds,
            &info((200.0, 400.0), (200.0, 1000.0)),
            Vec2::new(0.0, -600.0),
        )
        .unwrap();
        assert!(at_half.thumb.y > at_top.thumb.y);
        assert!(at_end.thumb.y > at_half.thumb.y);
        // At the end of the range the thumb touches the track bottom
        let track_bottom = at_end.track.y + at_end.track.height;
        assert!((at_end.thumb.y + at_end.thumb.height - track_bottom).abs() < 0.001);
    }

    #[test]
    fn test_no_geometry_when_content_fits() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 400.0);
        assert!(vertical(bounds, &info((200.0, 400.0), (200.0, 300.0)), Vec2::ZERO).is_none());
        assert!(horizontal(bounds, &info((200.0, 400.0), (150.0, 400.0)), Vec2::ZERO).is_none());
    }

    #[test]
    fn test_no_geometry_for_degenerate_viewport() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 0.0);
        assert!(vertical(bounds, &info((200.0, 0.0), (200.0, 1000.0)), Vec2::ZERO).is_none());
    }

    #[test]
    fn test_minimum_thumb_length() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        let geom = vertical(bounds, &info((200.0, 100.0), (200.0, 100_000.0)), Vec2::ZERO).unwrap();
        assert_eq!(geom.thumb.height, MIN_THUMB_LENGTH);
    }

    #[test]
    fn test_page_jump_proportional_and_clamped() {
        // Track 0..400, thumb 100, range 600
        let top = page_jump_offset(0.0, 0.0, 400.0, 100.0, 600.0);
        assert_eq!(top, 0.0);
        let bottom = page_jump_offset(400.0, 0.0, 400.0, 100.0, 600.0);
        assert_eq!(bottom, -600.0);
        let middle = page_jump_offset(200.0, 0.0, 400.0, 100.0, 600.0);
        assert_eq!(middle, -300.0);
    }

    #[test]
    fn test_page_jump_degenerate_is_zero() {
        assert_eq!(page_jump_offset(50.0, 0.0, 100.0, 100.0, 600.0), 0.0);
        assert_eq!(page_jump_offset(50.0, 0.0, 100.0, 20.0, 0.0), 0.0);
    }
}
