//! Backend-agnostic input model
//!
//! Backends translate native events (mouse, wheel, fingers, keys, resize)
//! into [`InputEvent`] values. Positions are already divided by the display
//! scale factor, so everything downstream works in logical coordinates.
//!
//! [`InputState`] is the per-frame fold of those events: current pointer
//! position, down flags, and the edge/delta data a single frame consumes.
//! It never touches scroll offsets; that is the scroll engine's job.

use crate::geometry::{Dimensions, Point, Vec2};

/// Editing keys forwarded to the focused text input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Home,
    End,
}

/// One translated native event
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { pos: Point },
    PointerPressed { pos: Point },
    PointerReleased { pos: Point },
    /// Wheel notches; positive y scrolls toward the end of the content
    Wheel { delta: Vec2, pos: Point },
    TouchDown { finger: u64, pos: Point },
    TouchMoved { finger: u64, pos: Point },
    TouchUp { finger: u64, pos: Point },
    Character(char),
    Edit(EditKey),
    Resized { size: Dimensions },
    CloseRequested,
}

/// Pointer affordance requested for the frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// Per-frame pointer/touch/keyboard state
#[derive(Clone, Debug, Default)]
pub struct InputState {
    /// Pointer position in logical coordinates
    pub pointer: Point,
    /// Primary mouse button held
    pub pointer_down: bool,
    /// Any finger held
    pub touch_down: bool,
    /// Primary press happened this frame
    pub pressed_this_frame: bool,
    /// Primary release happened this frame
    pub released_this_frame: bool,
    /// Wheel notches accumulated this frame
    pub wheel: Vec2,
    /// Characters typed this frame, in order
    pub characters: Vec<char>,
    /// Editing keys pressed this frame, in order
    pub edits: Vec<EditKey>,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// The shell should exit after this frame
    pub close_requested: bool,
}

impl InputState {
    /// Clear the per-frame edge data; held state carries over
    pub fn begin_frame(&mut self, delta_time: f32) {
        self.pressed_this_frame = false;
        self.released_this_frame = false;
        self.wheel = Vec2::ZERO;
        self.characters.clear();
        self.edits.clear();
        self.delta_time = delta_time;
    }

    /// Whether the primary button or a finger is currently down
    pub fn primary_down(&self) -> bool {
        self.pointer_down || self.touch_down
    }

    /// Fold one translated event into the state
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved { pos } => self.pointer = *pos,
            InputEvent::PointerPressed { pos } => {
                self.pointer = *pos;
                self.pointer_down = true;
                self.pressed_this_frame = true;
            }
            InputEvent::PointerReleased { pos } => {
                self.pointer = *pos;
                self.pointer_down = false;
                self.released_this_frame = true;
            }
            InputEvent::Wheel { delta, pos } => {
                self.pointer = *pos;
                self.wheel.x += delta.x;
                self.wheel.y += delta.y;
            }
            InputEvent::TouchDown { pos, .. } => {
                self.pointer = *pos;
                self.touch_down = true;
            }
            InputEvent::TouchMoved { pos, .. } => self.pointer = *pos,
            InputEvent::TouchUp { pos, .. } => {
                self.pointer = *pos;
                self.touch_down = false;
            }
            InputEvent::Character(c) => self.characters.push(*c),
            InputEvent::Edit(key) => self.edits.push(*key),
            InputEvent::CloseRequested => self.close_requested = true,
            // Resize is routed to the layout engine by the shell, not here
            InputEvent::Resized { .. } => {}
        }
    }
}
