//! Primitive-draw contract
//!
//! The command interpreter is written once; backends implement [`Painter`]
//! to supply the concrete primitives. The trait is object safe so custom
//! draw closures can receive `&mut dyn Painter`.
//!
//! Coordinates arriving here are logical; implementations apply the display
//! scale factor themselves.

use crate::color::Color;
use crate::command::{FontId, ImageKey};
use crate::geometry::{CornerRadius, Point, Rect};

pub trait Painter {
    /// Fill a rectangle, rounded when any corner radius is positive.
    ///
    /// Border corner caps arrive as radius-sized rects rounded on a single
    /// corner, so implementations must honor per-corner radii.
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color);

    /// Draw a text run with its top-left corner at `pos`.
    ///
    /// Implementations must tolerate an unloaded `font` by drawing nothing;
    /// the interpreter already filters those, but custom draw callbacks go
    /// through this path unchecked.
    fn draw_text(&mut self, pos: Point, text: &str, font: FontId, color: Color);

    /// Blit an image into `rect`, stretching as needed
    fn draw_image(&mut self, rect: Rect, image: ImageKey);

    /// Push a clip rectangle; nested clips intersect
    fn push_clip(&mut self, rect: Rect);

    /// Pop the innermost clip rectangle
    fn pop_clip(&mut self);

    /// Whether the slot currently holds a loaded font
    fn has_font(&self, font: FontId) -> bool;
}
