//! Scroll interaction engine
//!
//! Turns translated pointer/touch input into scroll-container offset
//! changes: content drags, scrollbar thumb drags, track page jumps, wheel
//! deltas, and post-release momentum. Exactly one interaction can be live
//! at a time; the state machine is
//!
//! ```text
//!            press on thumb            press in content
//!   Idle ──────────────────▶ ThumbDrag        │
//!     ▲ ◀──────── release ──────┘             ▼
//!     └──────────── release ───────────── ContentDrag ──▶ momentum
//! ```
//!
//! A press on the track outside the thumb performs an immediate page jump
//! and stays Idle. Touch input adds a Down phase that only becomes a drag
//! once cumulative travel crosses a distance threshold; a release before
//! that dispatches a synthetic click instead.
//!
//! Offsets are negative-or-zero: `-(content - viewport) <= offset <= 0`,
//! pinned to `0` whenever the content fits the viewport. Every write path
//! clamps.

use crate::layout::LayoutEngine;
use crate::registry::ScrollRegistry;
use crate::scrollbar;
use slate_core::{ElementId, Point, Vec2};

/// Timing and distance tuning.
///
/// The durations and distances here are feel parameters, not protocol
/// values; nothing outside this module depends on the specific numbers.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTuning {
    /// Wheel sensitivity is `base * content/viewport` per notch
    pub wheel_base_sensitivity: f32,
    /// Momentum velocity multiplier applied once per frame
    pub momentum_decay: f32,
    /// Velocity magnitude below which momentum snaps to zero
    pub min_velocity: f32,
    /// Touch travel that turns a Down into a drag
    pub touch_drag_threshold: f32,
    /// Maximum press-to-release travel that still counts as a click/tap
    pub tap_distance: f32,
    /// Seconds during which repeated wheel events are folded into one
    pub wheel_debounce: f64,
    /// Seconds during which a new finger-down is ignored after the last
    pub touch_debounce: f64,
    /// Seconds after a successful tap during which touches are ignored
    pub tap_quiet_period: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            wheel_base_sensitivity: 5.0,
            momentum_decay: 0.95,
            min_velocity: 0.1,
            touch_drag_threshold: 40.0,
            tap_distance: 10.0,
            wheel_debounce: 0.05,
            touch_debounce: 0.2,
            tap_quiet_period: 0.25,
        }
    }
}

/// What the live interaction is dragging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    None,
    Content,
    VerticalThumb,
    HorizontalThumb,
}

/// Touch gesture phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchPhase {
    #[default]
    None,
    Down,
    Dragging,
}

/// The single live drag interaction
#[derive(Clone, Copy, Debug, Default)]
struct ScrollState {
    mode: DragMode,
    active: Option<ElementId>,
    /// Pointer position when the drag started
    drag_origin: Point,
    /// Pointer position at the previous drag update (velocity sampling)
    last_pos: Point,
    /// Scroll offset when the drag started
    origin_offset: Vec2,
    velocity: Vec2,
}

/// Touch gesture disambiguation state
#[derive(Clone, Copy, Debug, Default)]
struct TouchState {
    phase: TouchPhase,
    finger: Option<u64>,
    origin: Point,
    last_touch: Option<f64>,
    last_tap: Option<f64>,
}

/// The interaction engine; one instance per shell
#[derive(Debug, Default)]
pub struct ScrollInteraction {
    pub tuning: ScrollTuning,
    state: ScrollState,
    touch: TouchState,
    last_wheel: Option<f64>,
}

/// Clamp an offset component to `[-(content - viewport), 0]`, pinning to
/// zero when the content fits (or the sizes are degenerate).
pub fn clamp_axis(value: f32, content: f32, viewport: f32) -> f32 {
    let scrollable = content - viewport;
    if scrollable <= 0.0 || viewport <= 0.0 {
        0.0
    } else {
        value.clamp(-scrollable, 0.0)
    }
}

fn wheel_sensitivity(content: f32, viewport: f32, base: f32) -> Option<f32> {
    if viewport <= 0.0 || content <= 0.0 {
        return None;
    }
    Some(base * (content / viewport))
}

impl ScrollInteraction {
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            tuning,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> DragMode {
        self.state.mode
    }

    pub fn active(&self) -> Option<ElementId> {
        self.state.active
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn touch_phase(&self) -> TouchPhase {
        self.touch.phase
    }

    // =========================================================================
    // Mouse path
    // =========================================================================

    /// Primary button press: evaluate thumbs, tracks, then content
    pub fn on_press(
        &mut self,
        pos: Point,
        layout: &mut dyn LayoutEngine,
        registry: &ScrollRegistry,
    ) {
        self.begin_drag(pos, layout, registry);
    }

    /// Pointer motion; drives whichever drag is live
    pub fn on_pointer_move(&mut self, pos: Point, layout: &mut dyn LayoutEngine, dt: f32) {
        self.drag_update(pos, layout, dt);
    }

    /// Primary button release. Content-drag velocity survives to seed
    /// momentum; the active container reference is cleared unconditionally.
    pub fn on_release(&mut self) {
        if self.state.mode != DragMode::Content {
            self.state.velocity = Vec2::ZERO;
        }
        self.state.mode = DragMode::None;
        self.state.active = None;
    }

    /// Wheel notches over whichever registered container is under `pos`.
    /// Returns whether a container consumed the event.
    pub fn on_wheel(
        &mut self,
        delta: Vec2,
        pos: Point,
        layout: &mut dyn LayoutEngine,
        registry: &ScrollRegistry,
        now: f64,
    ) -> bool {
        if self
            .last_wheel
            .is_some_and(|t| now - t < self.tuning.wheel_debounce)
        {
            tracing::trace!("wheel event debounced");
            return false;
        }
        self.last_wheel = Some(now);

        for entry in registry.iter() {
            let Some(bounds) = layout.element_geometry(entry.id) else {
                continue;
            };
            if !bounds.contains(pos) {
                continue;
            }
            let Some(info) = layout.scroll_info(entry.id) else {
                continue;
            };
            let Some(current) = layout.scroll_offset(entry.id) else {
                continue;
            };

            let base = self.tuning.wheel_base_sensitivity;
            let mut next = current;
            let mut applied = false;

            if delta.y != 0.0 {
                // A vertical wheel drives a horizontal-only container
                // sideways; otherwise it scrolls vertically.
                if info.axes.horizontal && !info.axes.vertical {
                    if let Some(s) = wheel_sensitivity(info.content.width, info.viewport.width, base)
                    {
                        next.x = clamp_axis(
                            current.x - delta.y * s,
                            info.content.width,
                            info.viewport.width,
                        );
                        applied = true;
                    }
                } else if info.axes.vertical {
                    if let Some(s) =
                        wheel_sensitivity(info.content.height, info.viewport.height, base)
                    {
                        next.y = clamp_axis(
                            current.y - delta.y * s,
                            info.content.height,
                            info.viewport.height,
                        );
                        applied = true;
                    }
                }
            }

            if delta.x != 0.0 && info.axes.horizontal {
                if let Some(s) = wheel_sensitivity(info.content.width, info.viewport.width, base) {
                    next.x = clamp_axis(
                        next.x - delta.x * s,
                        info.content.width,
                        info.viewport.width,
                    );
                    applied = true;
                }
            }

            if applied {
                tracing::trace!(
                    id = entry.id.0,
                    dy = delta.y,
                    from = current.y,
                    to = next.y,
                    "wheel scroll"
                );
                layout.set_scroll_offset(entry.id, next);
            }
            return applied;
        }
        false
    }

    // =========================================================================
    // Touch path
    // =========================================================================

    /// First finger down. Ignored while another finger is tracked, during
    /// the touch debounce, and during the post-tap quiet period.
    pub fn on_touch_down(&mut self, finger: u64, pos: Point, now: f64) {
        if self.touch.phase != TouchPhase::None {
            return;
        }
        if self
            .touch
            .last_touch
            .is_some_and(|t| now - t < self.tuning.touch_debounce)
        {
            tracing::trace!("touch down debounced");
            return;
        }
        if self
            .touch
            .last_tap
            .is_some_and(|t| now - t < self.tuning.tap_quiet_period)
        {
            tracing::trace!("touch down inside tap quiet period");
            return;
        }
        self.touch.phase = TouchPhase::Down;
        self.touch.finger = Some(finger);
        self.touch.origin = pos;
    }

    /// Finger motion: Down becomes Dragging once travel crosses the
    /// threshold, at which point the press targeting runs at the crossing
    /// position so the content does not jump by the threshold distance.
    pub fn on_touch_move(
        &mut self,
        finger: u64,
        pos: Point,
        layout: &mut dyn LayoutEngine,
        registry: &ScrollRegistry,
        dt: f32,
    ) {
        if self.touch.finger != Some(finger) || self.touch.phase == TouchPhase::None {
            return;
        }

        if self.touch.phase == TouchPhase::Down {
            if pos.distance_to(self.touch.origin) <= self.tuning.touch_drag_threshold {
                return;
            }
            self.touch.phase = TouchPhase::Dragging;
            self.begin_drag(pos, layout, registry);
        }

        self.drag_update(pos, layout, dt);
    }

    /// Finger up. A release still in Down phase within the tap distance
    /// yields the position of exactly one synthetic click; any drag state
    /// is released unconditionally either way.
    pub fn on_touch_up(&mut self, finger: u64, pos: Point, now: f64) -> Option<Point> {
        if self.touch.finger != Some(finger) || self.touch.phase == TouchPhase::None {
            return None;
        }

        let tapped = self.touch.phase == TouchPhase::Down
            && pos.distance_to(self.touch.origin) <= self.tuning.tap_distance;

        self.touch.last_touch = Some(now);
        self.touch.phase = TouchPhase::None;
        self.touch.finger = None;
        self.on_release();

        if tapped {
            self.touch.last_tap = Some(now);
            Some(pos)
        } else {
            None
        }
    }

    // =========================================================================
    // Momentum
    // =========================================================================

    /// Advance momentum by one frame: every registered container moves by
    /// `velocity * dt` on its enabled axes, clamped, then the velocity
    /// decays once. Below the minimum it is exactly zero.
    pub fn step(&mut self, dt: f32, layout: &mut dyn LayoutEngine, registry: &ScrollRegistry) {
        if dt <= 0.0 {
            return;
        }

        let min = self.tuning.min_velocity;
        let x_live = self.state.velocity.x.abs() > min;
        let y_live = self.state.velocity.y.abs() > min;
        if !x_live && !y_live {
            self.state.velocity = Vec2::ZERO;
            return;
        }

        for entry in registry.iter() {
            let Some(info) = layout.scroll_info(entry.id) else {
                continue;
            };
            let Some(current) = layout.scroll_offset(entry.id) else {
                continue;
            };
            let mut next = current;
            if y_live && info.axes.vertical {
                next.y = clamp_axis(
                    current.y + self.state.velocity.y * dt,
                    info.content.height,
                    info.viewport.height,
                );
            }
            if x_live && info.axes.horizontal {
                next.x = clamp_axis(
                    current.x + self.state.velocity.x * dt,
                    info.content.width,
                    info.viewport.width,
                );
            }
            if next != current {
                layout.set_scroll_offset(entry.id, next);
            }
        }

        let decay = self.tuning.momentum_decay;
        self.state.velocity.x = if x_live {
            let v = self.state.velocity.x * decay;
            if v.abs() > min {
                v
            } else {
                0.0
            }
        } else {
            0.0
        };
        self.state.velocity.y = if y_live {
            let v = self.state.velocity.y * decay;
            if v.abs() > min {
                v
            } else {
                0.0
            }
        } else {
            0.0
        };
    }

    // =========================================================================
    // Shared targeting and drag math
    // =========================================================================

    /// Press targeting: the first registered container under `pos` decides
    /// the interaction. Thumb hits start thumb drags, track hits page-jump
    /// and stay idle, anything else inside the bounds starts a content drag.
    fn begin_drag(&mut self, pos: Point, layout: &mut dyn LayoutEngine, registry: &ScrollRegistry) {
        for entry in registry.iter() {
            let Some(bounds) = layout.element_geometry(entry.id) else {
                continue;
            };
            if !bounds.contains(pos) {
                continue;
            }
            let Some(info) = layout.scroll_info(entry.id) else {
                continue;
            };
            let offset = layout.scroll_offset(entry.id).unwrap_or_default();

            if info.axes.vertical {
                if let Some(geom) = scrollbar::vertical(bounds, &info, offset) {
                    if geom.thumb.contains(pos) {
                        self.enter_drag(DragMode::VerticalThumb, entry.id, pos, offset);
                        return;
                    }
                    if geom.track.contains(pos) {
                        let new_y = scrollbar::page_jump_offset(
                            pos.y,
                            geom.track.y,
                            geom.track.height,
                            geom.thumb.height,
                            info.content.height - info.viewport.height,
                        );
                        tracing::trace!(id = entry.id.0, to = new_y, "page jump");
                        layout.set_scroll_offset(entry.id, Vec2::new(offset.x, new_y));
                        return;
                    }
                }
            }

            if info.axes.horizontal {
                if let Some(geom) = scrollbar::horizontal(bounds, &info, offset) {
                    if geom.thumb.contains(pos) {
                        self.enter_drag(DragMode::HorizontalThumb, entry.id, pos, offset);
                        return;
                    }
                    if geom.track.contains(pos) {
                        let new_x = scrollbar::page_jump_offset(
                            pos.x,
                            geom.track.x,
                            geom.track.width,
                            geom.thumb.width,
                            info.content.width - info.viewport.width,
                        );
                        tracing::trace!(id = entry.id.0, to = new_x, "page jump");
                        layout.set_scroll_offset(entry.id, Vec2::new(new_x, offset.y));
                        return;
                    }
                }
            }

            if info.axes.vertical || info.axes.horizontal {
                self.enter_drag(DragMode::Content, entry.id, pos, offset);
                return;
            }
        }
    }

    fn enter_drag(&mut self, mode: DragMode, id: ElementId, pos: Point, offset: Vec2) {
        tracing::trace!(id = id.0, ?mode, "drag start");
        self.state.mode = mode;
        self.state.active = Some(id);
        self.state.drag_origin = pos;
        self.state.last_pos = pos;
        self.state.origin_offset = offset;
        self.state.velocity = Vec2::ZERO;
    }

    /// Apply one pointer/finger movement to the live drag. A container that
    /// vanished from the layout makes this a no-op; the state self-heals on
    /// the next release.
    fn drag_update(&mut self, pos: Point, layout: &mut dyn LayoutEngine, dt: f32) {
        let Some(active) = self.state.active else {
            return;
        };
        let Some(info) = layout.scroll_info(active) else {
            tracing::trace!(id = active.0, "drag target vanished; ignoring update");
            return;
        };
        let current = layout.scroll_offset(active).unwrap_or_default();

        match self.state.mode {
            DragMode::None => {}
            DragMode::VerticalThumb => {
                let viewport = info.viewport.height;
                let content = info.content.height;
                if viewport <= 0.0 || content <= viewport {
                    return;
                }
                let delta = pos.y - self.state.drag_origin.y;
                let new_y = clamp_axis(
                    self.state.origin_offset.y - delta * (content / viewport),
                    content,
                    viewport,
                );
                layout.set_scroll_offset(active, Vec2::new(current.x, new_y));
            }
            DragMode::HorizontalThumb => {
                let viewport = info.viewport.width;
                let content = info.content.width;
                if viewport <= 0.0 || content <= viewport {
                    return;
                }
                let delta = pos.x - self.state.drag_origin.x;
                let new_x = clamp_axis(
                    self.state.origin_offset.x - delta * (content / viewport),
                    content,
                    viewport,
                );
                layout.set_scroll_offset(active, Vec2::new(new_x, current.y));
            }
            DragMode::Content => {
                let total = pos.delta_from(self.state.drag_origin);
                let mut next = current;
                if info.axes.vertical {
                    next.y = clamp_axis(
                        self.state.origin_offset.y + total.y,
                        info.content.height,
                        info.viewport.height,
                    );
                }
                if info.axes.horizontal {
                    next.x = clamp_axis(
                        self.state.origin_offset.x + total.x,
                        info.content.width,
                        info.viewport.width,
                    );
                }
                layout.set_scroll_offset(active, next);

                if dt > 0.0 {
                    let step = pos.delta_from(self.state.last_pos);
                    self.state.velocity = Vec2::new(step.x / dt, step.y / dt);
                }
                self.state.last_pos = pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureLayout;
    use slate_core::Rect;

    const ID: ElementId = ElementId(1);
    const DT: f32 = 1.0 / 60.0;

    /// Vertical container: bounds 200x400 at origin, content 1000 tall
    fn vertical_fixture() -> (FixtureLayout, ScrollRegistry) {
        let mut layout = FixtureLayout::default();
        layout.add_scroll(
            ID,
            Rect::new(0.0, 0.0, 200.0, 400.0),
            (200.0, 400.0),
            (200.0, 1000.0),
            true,
            false,
        );
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ID);
        registry.end_frame();
        (layout, registry)
    }

    #[test]
    fn test_content_drag_follows_pointer_then_clamps() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        // Press inside the content area (away from the scrollbar)
        scroll.on_press(Point::new(50.0, 200.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::Content);
        assert_eq!(scroll.active(), Some(ID));

        // Drag 50 units up: offset follows to exactly -50
        scroll.on_pointer_move(Point::new(50.0, 150.0), &mut layout, DT);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -50.0);

        // A further 1000 units up clamps at -(1000 - 400)
        scroll.on_pointer_move(Point::new(50.0, -850.0), &mut layout, DT);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -600.0);
    }

    #[test]
    fn test_release_always_returns_to_idle() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_press(Point::new(50.0, 200.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::Content);
        scroll.on_release();
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(scroll.active(), None);

        // Same from a thumb drag
        scroll.on_press(Point::new(195.0, 50.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::VerticalThumb);
        scroll.on_release();
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(scroll.active(), None);
    }

    #[test]
    fn test_thumb_drag_scales_by_content_ratio() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        // Thumb occupies the top 160px of the track at x >= 190
        scroll.on_press(Point::new(195.0, 50.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::VerticalThumb);

        // Dragging the thumb 40px down moves content 40 * (1000/400) = 100
        scroll.on_pointer_move(Point::new(195.0, 90.0), &mut layout, DT);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -100.0);

        // Far past the end clamps
        scroll.on_pointer_move(Point::new(195.0, 5000.0), &mut layout, DT);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -600.0);
    }

    #[test]
    fn test_track_click_page_jumps_and_stays_idle() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        // Click the track below the thumb (thumb spans 0..160)
        scroll.on_press(Point::new(195.0, 400.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(scroll.active(), None);
        // Click at the very bottom maps to the full range
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -600.0);
    }

    #[test]
    fn test_momentum_decays_monotonically_to_exact_zero() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        // Fling: drag with a fast move, then release
        scroll.on_press(Point::new(50.0, 300.0), &mut layout, &registry);
        scroll.on_pointer_move(Point::new(50.0, 280.0), &mut layout, DT);
        scroll.on_release();
        let mut last = scroll.velocity().y.abs();
        assert!(last > 0.0);

        let mut steps = 0;
        while scroll.velocity().y != 0.0 {
            scroll.step(DT, &mut layout, &registry);
            let mag = scroll.velocity().y.abs();
            assert!(mag < last || mag == 0.0, "momentum must strictly decay");
            last = mag;
            steps += 1;
            assert!(steps < 10_000, "momentum never settled");
        }
        // Once zeroed it stays exactly zero
        scroll.step(DT, &mut layout, &registry);
        assert_eq!(scroll.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_momentum_moves_offset_and_clamps() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_press(Point::new(50.0, 300.0), &mut layout, &registry);
        scroll.on_pointer_move(Point::new(50.0, 290.0), &mut layout, DT);
        scroll.on_release();

        let before = layout.scroll_offset(ID).unwrap().y;
        for _ in 0..1000 {
            scroll.step(DT, &mut layout, &registry);
        }
        let after = layout.scroll_offset(ID).unwrap().y;
        assert!(after < before);
        assert!(after >= -600.0);
    }

    #[test]
    fn test_wheel_applies_base_times_ratio() {
        let mut layout = FixtureLayout::default();
        // viewport 100, content 600 -> sensitivity 5 * 6 = 30 per notch
        layout.add_scroll(
            ID,
            Rect::new(0.0, 0.0, 200.0, 100.0),
            (200.0, 100.0),
            (200.0, 600.0),
            true,
            false,
        );
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ID);
        registry.end_frame();

        let mut scroll = ScrollInteraction::default();
        let consumed = scroll.on_wheel(
            Vec2::new(0.0, 3.0),
            Point::new(50.0, 50.0),
            &mut layout,
            &registry,
            1.0,
        );
        assert!(consumed);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -90.0);
    }

    #[test]
    fn test_wheel_debounce_folds_duplicate_notches() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();
        let pos = Point::new(50.0, 50.0);

        assert!(scroll.on_wheel(Vec2::new(0.0, 1.0), pos, &mut layout, &registry, 1.0));
        let after_first = layout.scroll_offset(ID).unwrap().y;
        // 10ms later: inside the debounce window, dropped
        assert!(!scroll.on_wheel(Vec2::new(0.0, 1.0), pos, &mut layout, &registry, 1.01));
        assert_eq!(layout.scroll_offset(ID).unwrap().y, after_first);
        // Past the window it applies again
        assert!(scroll.on_wheel(Vec2::new(0.0, 1.0), pos, &mut layout, &registry, 1.2));
        assert!(layout.scroll_offset(ID).unwrap().y < after_first);
    }

    #[test]
    fn test_wheel_over_degenerate_viewport_is_a_noop() {
        let mut layout = FixtureLayout::default();
        layout.add_scroll(
            ID,
            Rect::new(0.0, 0.0, 200.0, 100.0),
            (0.0, 0.0),
            (200.0, 600.0),
            true,
            false,
        );
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ID);
        registry.end_frame();

        let mut scroll = ScrollInteraction::default();
        scroll.on_wheel(
            Vec2::new(0.0, 3.0),
            Point::new(50.0, 50.0),
            &mut layout,
            &registry,
            1.0,
        );
        assert_eq!(layout.scroll_offset(ID).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_touch_tap_yields_one_click_and_no_scroll() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_touch_down(1, Point::new(50.0, 200.0), 1.0);
        assert_eq!(scroll.touch_phase(), TouchPhase::Down);
        scroll.on_touch_move(1, Point::new(53.0, 204.0), &mut layout, &registry, DT);
        // Still under the drag threshold: no scroll state, no offset change
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(layout.scroll_offset(ID).unwrap(), Vec2::ZERO);

        let click = scroll.on_touch_up(1, Point::new(53.0, 204.0), 1.1);
        assert_eq!(click, Some(Point::new(53.0, 204.0)));
        assert_eq!(scroll.touch_phase(), TouchPhase::None);
        assert_eq!(layout.scroll_offset(ID).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_touch_drag_crosses_threshold_and_scrolls() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_touch_down(1, Point::new(50.0, 300.0), 1.0);
        // Travel past the 40-unit threshold turns into a content drag
        scroll.on_touch_move(1, Point::new(50.0, 250.0), &mut layout, &registry, DT);
        assert_eq!(scroll.touch_phase(), TouchPhase::Dragging);
        assert_eq!(scroll.mode(), DragMode::Content);

        // Further motion scrolls from the crossing point
        scroll.on_touch_move(1, Point::new(50.0, 220.0), &mut layout, &registry, DT);
        assert_eq!(layout.scroll_offset(ID).unwrap().y, -30.0);

        // No synthetic click on release after a drag
        assert_eq!(scroll.on_touch_up(1, Point::new(50.0, 220.0), 2.0), None);
        assert_eq!(scroll.mode(), DragMode::None);
    }

    #[test]
    fn test_tap_quiet_period_suppresses_next_touch() {
        let mut scroll = ScrollInteraction::default();

        scroll.on_touch_down(1, Point::new(10.0, 10.0), 1.0);
        assert!(scroll.on_touch_up(1, Point::new(10.0, 10.0), 1.05).is_some());

        // Inside the quiet period the next down is ignored
        scroll.on_touch_down(2, Point::new(10.0, 10.0), 1.1);
        assert_eq!(scroll.touch_phase(), TouchPhase::None);

        // Past the quiet period touches register again
        scroll.on_touch_down(2, Point::new(10.0, 10.0), 1.5);
        assert_eq!(scroll.touch_phase(), TouchPhase::Down);
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_touch_down(1, Point::new(50.0, 300.0), 1.0);
        scroll.on_touch_down(2, Point::new(80.0, 300.0), 1.3);
        scroll.on_touch_move(2, Point::new(80.0, 100.0), &mut layout, &registry, DT);
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(scroll.on_touch_up(2, Point::new(80.0, 100.0), 1.4), None);
        // Finger 1 is still tracked
        assert_eq!(scroll.touch_phase(), TouchPhase::Down);
    }

    #[test]
    fn test_vanished_container_mid_drag_self_heals() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();

        scroll.on_press(Point::new(50.0, 200.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::Content);

        // The container disappears between frames
        layout.remove(ID);
        scroll.on_pointer_move(Point::new(50.0, 100.0), &mut layout, DT);
        // Update was a no-op; release restores idle
        scroll.on_release();
        assert_eq!(scroll.mode(), DragMode::None);
        assert_eq!(scroll.active(), None);
    }

    #[test]
    fn test_press_outside_any_container_stays_idle() {
        let (mut layout, registry) = vertical_fixture();
        let mut scroll = ScrollInteraction::default();
        scroll.on_press(Point::new(500.0, 500.0), &mut layout, &registry);
        assert_eq!(scroll.mode(), DragMode::None);
    }

    #[test]
    fn test_clamp_axis_pins_small_content_to_zero() {
        assert_eq!(clamp_axis(-50.0, 300.0, 400.0), 0.0);
        assert_eq!(clamp_axis(25.0, 1000.0, 400.0), 0.0);
        assert_eq!(clamp_axis(-700.0, 1000.0, 400.0), -600.0);
        assert_eq!(clamp_axis(-50.0, 1000.0, 0.0), 0.0);
    }
}
