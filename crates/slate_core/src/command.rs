//! Render command model
//!
//! The layout engine produces one ordered [`RenderCommand`] list per frame.
//! The command interpreter walks it in order, issuing primitive draws and
//! rebuilding the scroll-container registry as a side effect. Commands are
//! read-only to the interpreter.

use crate::color::Color;
use crate::geometry::{CornerRadius, Rect};
use crate::painter::Painter;
use slotmap::new_key_type;
use std::fmt;
use std::sync::Arc;

new_key_type! {
    /// Handle to a backend-owned image/texture
    pub struct ImageKey;
}

/// Handle into the fixed-size font slot table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u16);

/// Stable identifier for a layout element across frames
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Filled (optionally rounded) rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleCommand {
    pub color: Color,
    pub corner_radius: CornerRadius,
    /// Hovering this rectangle requests the pointer cursor
    pub cursor_sensitive: bool,
}

/// Text run positioned at the command's bounds origin
#[derive(Clone, Debug, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub font: FontId,
    pub color: Color,
}

/// One border edge; a width of zero means the edge is not drawn
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderEdge {
    pub width: f32,
    pub color: Color,
}

/// Up to four independent edges with per-corner radii
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderCommand {
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
    pub right: BorderEdge,
    pub corner_radius: CornerRadius,
}

/// Which axes a scroll container scrolls on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollAxes {
    pub vertical: bool,
    pub horizontal: bool,
}

/// Clip push; carries scroll configuration for scroll containers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScissorCommand {
    pub scroll: Option<ScrollAxes>,
}

/// Externally supplied draw routine for custom commands
pub type CustomDraw = dyn Fn(&Rect, &mut dyn Painter) + Send + Sync;

/// The tagged payload of a render command
#[derive(Clone)]
pub enum CommandKind {
    None,
    Rectangle(RectangleCommand),
    Text(TextCommand),
    Border(BorderCommand),
    /// Blit of a backend texture; `None` handles are skipped
    Image { image: Option<ImageKey> },
    ScissorStart(ScissorCommand),
    ScissorEnd,
    Custom { draw: Arc<CustomDraw> },
}

impl fmt::Debug for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::None => f.write_str("None"),
            CommandKind::Rectangle(cmd) => f.debug_tuple("Rectangle").field(cmd).finish(),
            CommandKind::Text(cmd) => f.debug_tuple("Text").field(cmd).finish(),
            CommandKind::Border(cmd) => f.debug_tuple("Border").field(cmd).finish(),
            CommandKind::Image { image } => f.debug_struct("Image").field("image", image).finish(),
            CommandKind::ScissorStart(cmd) => f.debug_tuple("ScissorStart").field(cmd).finish(),
            CommandKind::ScissorEnd => f.write_str("ScissorEnd"),
            CommandKind::Custom { .. } => f.write_str("Custom(..)"),
        }
    }
}

/// One entry of the per-frame draw list
#[derive(Clone, Debug)]
pub struct RenderCommand {
    pub id: ElementId,
    pub bounds: Rect,
    pub kind: CommandKind,
}

impl RenderCommand {
    pub fn new(id: ElementId, bounds: Rect, kind: CommandKind) -> Self {
        Self { id, bounds, kind }
    }

    pub fn rectangle(id: ElementId, bounds: Rect, color: Color) -> Self {
        Self::new(
            id,
            bounds,
            CommandKind::Rectangle(RectangleCommand {
                color,
                corner_radius: CornerRadius::ZERO,
                cursor_sensitive: false,
            }),
        )
    }

    pub fn text(id: ElementId, bounds: Rect, text: impl Into<String>, font: FontId, color: Color) -> Self {
        Self::new(
            id,
            bounds,
            CommandKind::Text(TextCommand {
                text: text.into(),
                font,
                color,
            }),
        )
    }

    pub fn scissor_start(id: ElementId, bounds: Rect, scroll: Option<ScrollAxes>) -> Self {
        Self::new(id, bounds, CommandKind::ScissorStart(ScissorCommand { scroll }))
    }

    pub fn scissor_end(id: ElementId, bounds: Rect) -> Self {
        Self::new(id, bounds, CommandKind::ScissorEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_custom_commands_clone_shares_the_closure() {
        let cmd = RenderCommand::new(
            ElementId(1),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            CommandKind::Custom {
                draw: Arc::new(|_, _| {}),
            },
        );
        let copy = cmd.clone();
        match (&cmd.kind, &copy.kind) {
            (CommandKind::Custom { draw: a }, CommandKind::Custom { draw: b }) => {
                assert!(Arc::ptr_eq(a, b));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_debug_formats_custom_without_payload() {
        let kind = CommandKind::Custom {
            draw: Arc::new(|_, _| {}),
        };
        assert_eq!(format!("{kind:?}"), "Custom(..)");
    }

    #[test]
    fn test_text_constructor() {
        let cmd = RenderCommand::text(
            ElementId(7),
            Rect::new(1.0, 2.0, 3.0, 4.0),
            "hello",
            FontId(0),
            Color::WHITE,
        );
        assert_eq!(cmd.bounds.origin(), Point::new(1.0, 2.0));
        match cmd.kind {
            CommandKind::Text(text) => assert_eq!(text.text, "hello"),
            _ => unreachable!(),
        }
    }
}
