//! Test support: headless collaborators
//!
//! The engine is exercised without a window or GPU by pairing
//! [`FixtureLayout`] (a scriptable stand-in for the external layout engine)
//! with [`RecordingPainter`] (which captures primitive draws instead of
//! rasterizing) and [`HeadlessBackend`] (a deterministic-clock backend that
//! drives the real command interpreter). Unit tests, integration tests, and
//! downstream crates all share these.

use crate::backend::Backend;
use crate::error::Result;
use crate::interpreter::{CommandInterpreter, FrameInfo};
use crate::layout::{LayoutEngine, ScrollContainerInfo};
use rustc_hash::FxHashMap;
use slate_core::{
    Color, CornerRadius, Dimensions, ElementId, FontId, ImageKey, InputEvent, Painter, Point,
    Rect, RenderCommand, ScrollAxes, Vec2,
};
use std::collections::VecDeque;
use std::path::Path;

// ============================================================================
// Fixture layout engine
// ============================================================================

/// One scripted scroll container
#[derive(Clone, Copy, Debug)]
pub struct FixtureScroll {
    pub bounds: Rect,
    pub info: ScrollContainerInfo,
    pub offset: Vec2,
}

/// Scriptable implementation of the layout contract
#[derive(Clone, Debug, Default)]
pub struct FixtureLayout {
    pub elements: FxHashMap<ElementId, Rect>,
    pub scrolls: FxHashMap<ElementId, FixtureScroll>,
    /// Returned verbatim from `end_layout`
    pub commands: Vec<RenderCommand>,
    pub dimensions: Dimensions,
    pub pointer: (Point, bool),
    /// Recorded `update_scroll_containers` invocations
    pub update_calls: Vec<(bool, Vec2, f32)>,
    pub layout_open: bool,
}

impl FixtureLayout {
    pub fn add_element(&mut self, id: ElementId, bounds: Rect) {
        self.elements.insert(id, bounds);
    }

    pub fn add_scroll(
        &mut self,
        id: ElementId,
        bounds: Rect,
        viewport: (f32, f32),
        content: (f32, f32),
        vertical: bool,
        horizontal: bool,
    ) {
        self.scrolls.insert(
            id,
            FixtureScroll {
                bounds,
                info: ScrollContainerInfo {
                    viewport: Dimensions::new(viewport.0, viewport.1),
                    content: Dimensions::new(content.0, content.1),
                    axes: ScrollAxes {
                        vertical,
                        horizontal,
                    },
                },
                offset: Vec2::ZERO,
            },
        );
    }

    /// Drop an element or container, as if the next layout omitted it
    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(&id);
        self.scrolls.remove(&id);
    }

    pub fn set_commands(&mut self, commands: Vec<RenderCommand>) {
        self.commands = commands;
    }
}

impl LayoutEngine for FixtureLayout {
    fn begin_layout(&mut self) {
        self.layout_open = true;
    }

    fn end_layout(&mut self) -> Vec<RenderCommand> {
        self.layout_open = false;
        self.commands.clone()
    }

    fn set_layout_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    fn set_pointer_state(&mut self, pos: Point, pressed: bool) {
        self.pointer = (pos, pressed);
    }

    fn element_geometry(&self, id: ElementId) -> Option<Rect> {
        self.scrolls
            .get(&id)
            .map(|s| s.bounds)
            .or_else(|| self.elements.get(&id).copied())
    }

    fn scroll_info(&self, id: ElementId) -> Option<ScrollContainerInfo> {
        self.scrolls.get(&id).map(|s| s.info)
    }

    fn scroll_offset(&self, id: ElementId) -> Option<Vec2> {
        self.scrolls.get(&id).map(|s| s.offset)
    }

    fn set_scroll_offset(&mut self, id: ElementId, offset: Vec2) {
        if let Some(scroll) = self.scrolls.get_mut(&id) {
            scroll.offset = offset;
        }
    }

    fn update_scroll_containers(&mut self, pointer_driven: bool, delta: Vec2, dt: f32) {
        self.update_calls.push((pointer_driven, delta, dt));
    }
}

// ============================================================================
// Recording painter
// ============================================================================

/// One captured primitive draw
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    Rect {
        rect: Rect,
        radius: CornerRadius,
        color: Color,
    },
    Text {
        pos: Point,
        text: String,
        font: FontId,
        color: Color,
    },
    Image {
        rect: Rect,
        image: ImageKey,
    },
    PushClip(Rect),
    PopClip,
}

/// Painter that records primitives instead of drawing them
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
    pub loaded_fonts: Vec<FontId>,
}

impl RecordingPainter {
    pub fn with_fonts(fonts: &[FontId]) -> Self {
        Self {
            ops: Vec::new(),
            loaded_fonts: fonts.to_vec(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Rect { rect, color, .. } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn count_rects_with_color(&self, color: Color, epsilon: f32) -> usize {
        self.rects()
            .filter(|(_, c)| {
                (c.r - color.r).abs() < epsilon
                    && (c.g - color.g).abs() < epsilon
                    && (c.b - color.b).abs() < epsilon
            })
            .count()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.ops.push(PaintOp::Rect {
            rect,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, pos: Point, text: &str, font: FontId, color: Color) {
        self.ops.push(PaintOp::Text {
            pos,
            text: text.to_string(),
            font,
            color,
        });
    }

    fn draw_image(&mut self, rect: Rect, image: ImageKey) {
        self.ops.push(PaintOp::Image { rect, image });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(PaintOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(PaintOp::PopClip);
    }

    fn has_font(&self, font: FontId) -> bool {
        self.loaded_fonts.contains(&font)
    }
}

// ============================================================================
// Headless backend
// ============================================================================

/// Backend with a deterministic clock and no window. Each `poll_events`
/// call pops one scripted event batch; `render` drives the real command
/// interpreter into a [`RecordingPainter`].
pub struct HeadlessBackend {
    /// One entry per frame, popped front-first
    pub event_batches: VecDeque<Vec<InputEvent>>,
    /// Draws of the most recent frame
    pub painter: RecordingPainter,
    clock: std::cell::Cell<f64>,
    tick: f64,
}

impl HeadlessBackend {
    /// `tick` is the simulated frame duration in seconds; every `now()`
    /// query advances the clock by one tick
    pub fn new(tick: f64) -> Self {
        Self {
            event_batches: VecDeque::new(),
            painter: RecordingPainter::default(),
            clock: std::cell::Cell::new(0.0),
            tick,
        }
    }

    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.event_batches.push_back(events);
    }
}

impl Backend for HeadlessBackend {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        if let Some(batch) = self.event_batches.pop_front() {
            out.extend(batch);
        }
        Ok(())
    }

    fn render(
        &mut self,
        commands: &[RenderCommand],
        interpreter: &mut CommandInterpreter,
        layout: &dyn LayoutEngine,
        frame: &FrameInfo,
    ) -> Result<()> {
        self.painter.ops.clear();
        interpreter.execute(commands, &mut self.painter, layout, frame);
        Ok(())
    }

    fn load_font(&mut self, _path: &Path, _size: f32, slot: u16) -> Result<FontId> {
        self.painter.loaded_fonts.push(FontId(slot));
        Ok(FontId(slot))
    }

    fn unload_font(&mut self, font: FontId) {
        self.painter.loaded_fonts.retain(|f| *f != font);
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageKey> {
        Err(crate::error::BackendError::ImageLoad(format!(
            "headless backend cannot load {}",
            path.display()
        ))
        .into())
    }

    fn load_image_bytes(&mut self, _bytes: &[u8]) -> Result<ImageKey> {
        Err(crate::error::BackendError::ImageLoad(
            "headless backend cannot decode images".to_string(),
        )
        .into())
    }

    fn unload_image(&mut self, _image: ImageKey) {}

    fn image_dimensions(&self, _image: ImageKey) -> Option<Dimensions> {
        None
    }

    fn measure_text(&self, text: &str, _font: FontId) -> Dimensions {
        // Fixed-advance metrics keep layout tests deterministic
        Dimensions::new(text.chars().count() as f32 * 8.0, 16.0)
    }

    fn now(&self) -> f64 {
        let t = self.clock.get() + self.tick;
        self.clock.set(t);
        t
    }

    fn scale_factor(&self) -> f32 {
        1.0
    }

    fn logical_size(&self) -> Dimensions {
        Dimensions::new(800.0, 600.0)
    }

    fn set_window_size(&mut self, _size: Dimensions) {}

    fn toggle_fullscreen(&mut self) {}
}
