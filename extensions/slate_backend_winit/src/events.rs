//! Winit event translation
//!
//! Maps winit window events to the backend-agnostic input model. Positions
//! are divided by the window scale factor so everything downstream is
//! logical; wheel deltas are normalized so positive y scrolls toward the
//! end of the content.

use slate_core::{Dimensions, EditKey, InputEvent, Point, Vec2};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Pixels of trackpad travel treated as one wheel notch
const PIXELS_PER_NOTCH: f64 = 30.0;

/// State the translator needs across events
#[derive(Debug, Default)]
pub struct Translator {
    pointer: Point,
}

impl Translator {
    /// Translate one window event; pushes zero or more input events
    pub fn translate(&mut self, event: &WindowEvent, scale: f64, out: &mut Vec<InputEvent>) {
        match event {
            WindowEvent::CloseRequested => out.push(InputEvent::CloseRequested),
            WindowEvent::Resized(size) => {
                out.push(InputEvent::Resized {
                    size: Dimensions::new(
                        (size.width as f64 / scale) as f32,
                        (size.height as f64 / scale) as f32,
                    ),
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Point::new(
                    (position.x / scale) as f32,
                    (position.y / scale) as f32,
                );
                out.push(InputEvent::PointerMoved { pos: self.pointer });
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let pos = self.pointer;
                out.push(match state {
                    ElementState::Pressed => InputEvent::PointerPressed { pos },
                    ElementState::Released => InputEvent::PointerReleased { pos },
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    // Positive winit line delta scrolls away from the user;
                    // flip so positive means toward the end of the content
                    MouseScrollDelta::LineDelta(x, y) => (-x, -y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        -(pos.x / PIXELS_PER_NOTCH) as f32,
                        -(pos.y / PIXELS_PER_NOTCH) as f32,
                    ),
                };
                if x != 0.0 || y != 0.0 {
                    out.push(InputEvent::Wheel {
                        delta: Vec2::new(x, y),
                        pos: self.pointer,
                    });
                }
            }
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => {
                let pos = Point::new(
                    (location.x / scale) as f32,
                    (location.y / scale) as f32,
                );
                self.pointer = pos;
                out.push(match phase {
                    TouchPhase::Started => InputEvent::TouchDown { finger: *id, pos },
                    TouchPhase::Moved => InputEvent::TouchMoved { finger: *id, pos },
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        InputEvent::TouchUp { finger: *id, pos }
                    }
                });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some(edit) = edit_key(&event.logical_key) {
                    out.push(InputEvent::Edit(edit));
                    return;
                }
                if let Some(text) = &event.text {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        out.push(InputEvent::Character(c));
                    }
                }
            }
            _ => {}
        }
    }
}

fn edit_key(key: &Key) -> Option<EditKey> {
    match key {
        Key::Named(NamedKey::Backspace) => Some(EditKey::Backspace),
        Key::Named(NamedKey::Delete) => Some(EditKey::Delete),
        Key::Named(NamedKey::Enter) => Some(EditKey::Enter),
        Key::Named(NamedKey::ArrowLeft) => Some(EditKey::Left),
        Key::Named(NamedKey::ArrowRight) => Some(EditKey::Right),
        Key::Named(NamedKey::Home) => Some(EditKey::Home),
        Key::Named(NamedKey::End) => Some(EditKey::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_cursor_positions_are_logical() {
        let mut translator = Translator::default();
        let mut out = Vec::new();
        translator.translate(
            &WindowEvent::CursorMoved {
                device_id: unsafe { winit::event::DeviceId::dummy() },
                position: PhysicalPosition::new(200.0, 100.0),
            },
            2.0,
            &mut out,
        );
        assert_eq!(
            out,
            vec![InputEvent::PointerMoved {
                pos: Point::new(100.0, 50.0)
            }]
        );
    }

    #[test]
    fn test_wheel_line_delta_flips_sign() {
        let mut translator = Translator::default();
        let mut out = Vec::new();
        translator.translate(
            &WindowEvent::MouseWheel {
                device_id: unsafe { winit::event::DeviceId::dummy() },
                delta: MouseScrollDelta::LineDelta(0.0, -1.0),
                phase: TouchPhase::Moved,
            },
            1.0,
            &mut out,
        );
        match &out[0] {
            InputEvent::Wheel { delta, .. } => assert_eq!(delta.y, 1.0),
            other => unreachable!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_edit_key_mapping() {
        assert_eq!(
            edit_key(&Key::Named(NamedKey::Backspace)),
            Some(EditKey::Backspace)
        );
        assert_eq!(edit_key(&Key::Named(NamedKey::ArrowLeft)), Some(EditKey::Left));
        assert_eq!(edit_key(&Key::Character("a".into())), None);
    }
}
