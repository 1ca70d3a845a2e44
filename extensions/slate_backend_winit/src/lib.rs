//! slate winit backend
//!
//! Windowing and input via winit, presentation via a softbuffer CPU
//! framebuffer. Text is rasterized with fontdue, images decoded with the
//! `image` crate. Winit exposes the unified mouse abstraction (and forwards
//! platform touch as discrete finger events, which translate directly to
//! the shared input model).
//!
//! All interaction semantics live in `slate_engine`; this crate only
//! translates events and rasterizes primitives.

mod backend;
mod events;
mod raster;

pub use backend::{WinitBackend, WinitOptions};
