//! Backend adapter contract
//!
//! A backend owns the native window/surface and implements exactly two
//! responsibilities: translating native events into the shared input model,
//! and supplying primitive draws plus resource loading. Scroll semantics,
//! hit-testing, and command interpretation never live in a backend, which
//! is what keeps the implementations interchangeable.
//!
//! Construction is backend-specific (each has its own config type and
//! `new(...) -> Result<Self>`); everything after that goes through this
//! trait. Teardown is `Drop`.

use crate::error::Result;
use crate::interpreter::{CommandInterpreter, FrameInfo};
use crate::layout::LayoutEngine;
use slate_core::{Dimensions, FontId, ImageKey, InputEvent, RenderCommand};
use std::path::Path;

pub trait Backend {
    /// Drain the native event queue into translated events. Positions are
    /// logical (already divided by the scale factor).
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()>;

    /// Draw one frame: clear, run the interpreter over `commands` with this
    /// backend's painter, apply the resulting cursor style, present.
    fn render(
        &mut self,
        commands: &[RenderCommand],
        interpreter: &mut CommandInterpreter,
        layout: &dyn LayoutEngine,
        frame: &FrameInfo,
    ) -> Result<()>;

    /// Load a font file at `size` points into `slot`
    fn load_font(&mut self, path: &Path, size: f32, slot: u16) -> Result<FontId>;

    fn unload_font(&mut self, font: FontId);

    /// Load and decode an image file into a backend texture
    fn load_image(&mut self, path: &Path) -> Result<ImageKey>;

    /// Decode an in-memory encoded image into a backend texture
    fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<ImageKey>;

    fn unload_image(&mut self, image: ImageKey);

    /// Pixel dimensions of a loaded image, `None` for stale handles
    fn image_dimensions(&self, image: ImageKey) -> Option<Dimensions>;

    /// Logical dimensions `text` occupies in `font`; zero for empty slots
    fn measure_text(&self, text: &str, font: FontId) -> Dimensions;

    /// Monotonic time in seconds
    fn now(&self) -> f64;

    fn scale_factor(&self) -> f32;

    /// Current window size in logical coordinates
    fn logical_size(&self) -> Dimensions;

    /// Resize the window (logical coordinates)
    fn set_window_size(&mut self, size: Dimensions);

    fn toggle_fullscreen(&mut self);

    /// Show the platform's on-screen keyboard where one exists
    fn start_text_input(&mut self) {}

    /// Hide the platform's on-screen keyboard where one exists
    fn stop_text_input(&mut self) {}
}
