//! External layout engine contract
//!
//! The constraint-solving layout engine is an external collaborator: it
//! produces the ordered command list once per frame and answers geometry
//! and scroll-container queries against the most recent layout. This trait
//! is everything slate consumes from it.
//!
//! Scroll offsets are owned by the layout engine (they feed back into the
//! next layout pass); the scroll-interaction engine reads and writes them
//! exclusively through [`LayoutEngine::scroll_offset`] /
//! [`LayoutEngine::set_scroll_offset`], always pre-clamped.

use slate_core::{Dimensions, ElementId, Point, Rect, RenderCommand, ScrollAxes, Vec2};

/// Scroll container data snapshot for one element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollContainerInfo {
    /// Visible region size
    pub viewport: Dimensions,
    /// Laid-out content size
    pub content: Dimensions,
    /// Enabled scroll axes
    pub axes: ScrollAxes,
}

pub trait LayoutEngine {
    /// Open a new layout pass
    fn begin_layout(&mut self);

    /// Close the layout pass and return the frame's ordered command list
    fn end_layout(&mut self) -> Vec<RenderCommand>;

    /// Propagate new logical window dimensions (resize handling)
    fn set_layout_dimensions(&mut self, dimensions: Dimensions);

    /// Feed the pointer position and pressed flag for the engine's own
    /// hover/press bookkeeping
    fn set_pointer_state(&mut self, pos: Point, pressed: bool);

    /// Bounding box of an element from the most recent layout
    fn element_geometry(&self, id: ElementId) -> Option<Rect>;

    /// Scroll container data for an element, if it is one
    fn scroll_info(&self, id: ElementId) -> Option<ScrollContainerInfo>;

    /// Current scroll offset of a container (both components `<= 0`)
    fn scroll_offset(&self, id: ElementId) -> Option<Vec2>;

    /// Replace a container's scroll offset. Callers clamp before writing;
    /// implementations may clamp again but must not otherwise adjust.
    fn set_scroll_offset(&mut self, id: ElementId, offset: Vec2);

    /// Per-frame scroll bookkeeping hook of the external engine. The shell
    /// invokes this once per frame after interaction processing so the
    /// engine can sync any internal per-container state; slate's own
    /// offset math never routes through it.
    fn update_scroll_containers(&mut self, pointer_driven: bool, delta: Vec2, dt: f32);
}
