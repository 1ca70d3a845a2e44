//! slate SDL2 backend
//!
//! Windowing, input, and rendering through the `sdl2` crate: accelerated
//! canvas primitives (rounded boxes and pies from the gfx module), TTF
//! fonts, and textures from the image module. SDL delivers discrete
//! finger-tracking events, which map directly onto the shared input
//! model's touch variants.
//!
//! All interaction semantics live in `slate_engine`; this crate only
//! translates events and draws primitives.

mod backend;
mod events;

pub use backend::{SdlBackend, SdlOptions};
