//! Render command interpreter
//!
//! One ordered pass over the frame's command list. Each entry either issues
//! a primitive draw through the backend's [`Painter`] or updates
//! bookkeeping: scroll containers re-register themselves into the frame
//! registry, and cursor-sensitive rectangles under the pointer mark the
//! frame as hovered. When the pass completes, the rebuilt registry becomes
//! the authoritative hit-test set for the next frame's input processing —
//! interpretation must finish before input consults it again.
//!
//! Scrollbars are drawn here, not by widgets: a scroll container's
//! ScissorStart carries its axis configuration, and for every axis whose
//! content exceeds its viewport the track and thumb are painted with the
//! theme's scrollbar colors, a hover variant for the thumb, and a fade
//! opacity that rises with pointer/scroll activity and decays after an
//! idle delay.

use crate::layout::LayoutEngine;
use crate::registry::ScrollRegistry;
use crate::scrollbar;
use slate_core::{
    BorderCommand, CommandKind, CornerRadius, CursorStyle, ElementId, Painter, Point, Rect,
    RenderCommand, ScrollAxes, Theme,
};

/// Seconds for a full scrollbar fade in or out. Feel parameter, tunable.
pub const SCROLLBAR_FADE_DURATION: f32 = 0.6;

/// Idle seconds before the scrollbar starts fading out. Feel parameter.
pub const SCROLLBAR_HIDE_DELAY: f64 = 0.6;

/// Read-only per-frame inputs to the interpreter
pub struct FrameInfo<'a> {
    /// Pointer position in logical coordinates
    pub pointer: Point,
    pub theme: &'a Theme,
    /// Frame timestamp in seconds
    pub now: f64,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// The shared command walker; one instance per shell
#[derive(Debug, Default)]
pub struct CommandInterpreter {
    registry: ScrollRegistry,
    cursor: CursorStyle,
    scrollbar_opacity: f32,
    last_activity: f64,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame's scroll container set
    pub fn registry(&self) -> &ScrollRegistry {
        &self.registry
    }

    /// Cursor style decided by the most recent pass
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn scrollbar_opacity(&self) -> f32 {
        self.scrollbar_opacity
    }

    /// Record pointer/scroll activity; keeps scrollbars visible
    pub fn note_activity(&mut self, now: f64) {
        self.last_activity = now;
    }

    /// Walk the frame's command list in order
    pub fn execute(
        &mut self,
        commands: &[RenderCommand],
        painter: &mut dyn Painter,
        layout: &dyn LayoutEngine,
        frame: &FrameInfo,
    ) {
        self.update_scrollbar_fade(frame);
        self.registry.begin_frame();
        let mut hovered = false;

        for cmd in commands {
            match &cmd.kind {
                CommandKind::None => {}
                CommandKind::Rectangle(rect) => {
                    if rect.cursor_sensitive && cmd.bounds.contains(frame.pointer) {
                        hovered = true;
                    }
                    painter.fill_rect(cmd.bounds, rect.corner_radius, rect.color);
                }
                CommandKind::Text(text) => {
                    if text.text.is_empty() {
                        continue;
                    }
                    if !painter.has_font(text.font) {
                        tracing::trace!(font = text.font.0, "skipping text with unloaded font");
                        continue;
                    }
                    painter.draw_text(cmd.bounds.origin(), &text.text, text.font, text.color);
                }
                CommandKind::Border(border) => draw_border(cmd.bounds, border, painter),
                CommandKind::Image { image } => match image {
                    Some(key) => painter.draw_image(cmd.bounds, *key),
                    None => tracing::trace!("skipping image command with no handle"),
                },
                CommandKind::ScissorStart(scissor) => {
                    if let Some(axes) = scissor.scroll {
                        self.registry.register(cmd.id);
                        self.draw_scrollbars(cmd.id, cmd.bounds, axes, painter, layout, frame);
                    }
                    painter.push_clip(cmd.bounds);
                }
                CommandKind::ScissorEnd => painter.pop_clip(),
                CommandKind::Custom { draw } => draw(&cmd.bounds, painter),
            }
        }

        self.registry.end_frame();
        self.cursor = if hovered {
            CursorStyle::Pointer
        } else {
            CursorStyle::Default
        };
    }

    fn update_scrollbar_fade(&mut self, frame: &FrameInfo) {
        let idle = frame.now - self.last_activity;
        let step = frame.dt / SCROLLBAR_FADE_DURATION;
        self.scrollbar_opacity = if idle < SCROLLBAR_HIDE_DELAY {
            (self.scrollbar_opacity + step).min(1.0)
        } else {
            (self.scrollbar_opacity - step).max(0.0)
        };
    }

    fn draw_scrollbars(
        &self,
        id: ElementId,
        bounds: Rect,
        axes: ScrollAxes,
        painter: &mut dyn Painter,
        layout: &dyn LayoutEngine,
        frame: &FrameInfo,
    ) {
        if self.scrollbar_opacity <= 0.0 {
            return;
        }
        let Some(info) = layout.scroll_info(id) else {
            return;
        };
        let offset = layout.scroll_offset(id).unwrap_or_default();

        let mut geometries = [None, None];
        if axes.vertical {
            geometries[0] = scrollbar::vertical(bounds, &info, offset);
        }
        if axes.horizontal {
            geometries[1] = scrollbar::horizontal(bounds, &info, offset);
        }

        for geom in geometries.into_iter().flatten() {
            painter.fill_rect(
                geom.track,
                CornerRadius::ZERO,
                frame.theme.scrollbar_track.fade(self.scrollbar_opacity),
            );
            let thumb_color = if geom.thumb.contains(frame.pointer) {
                frame.theme.scrollbar_thumb_hover
            } else {
                frame.theme.scrollbar_thumb
            };
            painter.fill_rect(
                geom.thumb,
                CornerRadius::ZERO,
                thumb_color.fade(self.scrollbar_opacity),
            );
        }
    }
}

/// Decompose a border into edge strips plus quarter-disc corner caps.
///
/// Strips are inset by the adjacent corner radii; a cap is a radius-sized
/// rect rounded fully on its own corner, which fills exactly the quarter
/// disc under the arc. Top caps take the top edge's color, bottom caps the
/// bottom edge's.
fn draw_border(bounds: Rect, border: &BorderCommand, painter: &mut dyn Painter) {
    let radius = border.corner_radius;

    if border.top.width > 0.0 {
        painter.fill_rect(
            Rect::new(
                bounds.x + radius.top_left,
                bounds.y,
                bounds.width - radius.top_left - radius.top_right,
                border.top.width,
            ),
            CornerRadius::ZERO,
            border.top.color,
        );
        if radius.top_left > 0.0 {
            painter.fill_rect(
                Rect::new(bounds.x, bounds.y, radius.top_left, radius.top_left),
                CornerRadius {
                    top_left: radius.top_left,
                    ..CornerRadius::ZERO
                },
                border.top.color,
            );
        }
        if radius.top_right > 0.0 {
            painter.fill_rect(
                Rect::new(
                    bounds.x + bounds.width - radius.top_right,
                    bounds.y,
                    radius.top_right,
                    radius.top_right,
                ),
                CornerRadius {
                    top_right: radius.top_right,
                    ..CornerRadius::ZERO
                },
                border.top.color,
            );
        }
    }

    if border.bottom.width > 0.0 {
        painter.fill_rect(
            Rect::new(
                bounds.x + radius.bottom_left,
                bounds.y + bounds.height - border.bottom.width,
                bounds.width - radius.bottom_left - radius.bottom_right,
                border.bottom.width,
            ),
            CornerRadius::ZERO,
            border.bottom.color,
        );
        if radius.bottom_left > 0.0 {
            painter.fill_rect(
                Rect::new(
                    bounds.x,
                    bounds.y + bounds.height - radius.bottom_left,
                    radius.bottom_left,
                    radius.bottom_left,
                ),
                CornerRadius {
                    bottom_left: radius.bottom_left,
                    ..CornerRadius::ZERO
                },
                border.bottom.color,
            );
        }
        if radius.bottom_right > 0.0 {
            painter.fill_rect(
                Rect::new(
                    bounds.x + bounds.width - radius.bottom_right,
                    bounds.y + bounds.height - radius.bottom_right,
                    radius.bottom_right,
                    radius.bottom_right,
                ),
                CornerRadius {
                    bottom_right: radius.bottom_right,
                    ..CornerRadius::ZERO
                },
                border.bottom.color,
            );
        }
    }

    if border.left.width > 0.0 {
        painter.fill_rect(
            Rect::new(
                bounds.x,
                bounds.y + radius.top_left,
                border.left.width,
                bounds.height - radius.top_left - radius.bottom_left,
            ),
            CornerRadius::ZERO,
            border.left.color,
        );
    }

    if border.right.width > 0.0 {
        painter.fill_rect(
            Rect::new(
                bounds.x + bounds.width - border.right.width,
                bounds.y + radius.top_right,
                border.right.width,
                bounds.height - radius.top_right - radius.bottom_right,
            ),
            CornerRadius::ZERO,
            border.right.color,
        );
    }
}
