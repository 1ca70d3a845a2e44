//! slate foundation types
//!
//! This crate provides the data model shared by every other slate crate:
//!
//! - **Geometry**: points, vectors, rectangles, corner radii
//! - **Color & Theme**: RGBA colors and the swappable palette
//! - **Input model**: backend-agnostic input events and per-frame state
//! - **Render commands**: the ordered draw list produced by the layout
//!   engine and consumed by the command interpreter
//! - **Painter**: the object-safe primitive-draw contract backends implement
//!
//! Nothing here touches a native API; backends translate into these types
//! and the engine crate operates on them exclusively.

pub mod color;
pub mod command;
pub mod geometry;
pub mod input;
pub mod painter;
pub mod theme;

pub use color::Color;
pub use command::{
    BorderCommand, BorderEdge, CommandKind, CustomDraw, ElementId, FontId, ImageKey,
    RectangleCommand, RenderCommand, ScissorCommand, ScrollAxes, TextCommand,
};
pub use geometry::{CornerRadius, Dimensions, Point, Rect, Vec2};
pub use input::{CursorStyle, EditKey, InputEvent, InputState};
pub use painter::Painter;
pub use theme::Theme;
