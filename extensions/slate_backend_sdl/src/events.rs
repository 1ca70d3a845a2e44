//! SDL event translation
//!
//! SDL reports mouse coordinates in window points and finger coordinates
//! normalized to `0..1`; both are converted to logical coordinates here.
//! Wheel deltas are flipped so positive y means toward the end of the
//! content, matching the shared convention.

use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use slate_core::{Dimensions, EditKey, InputEvent, Point, Vec2};

/// Normalized finger coordinates to a logical position
pub fn finger_position(nx: f32, ny: f32, window: (u32, u32), scale: f32) -> Point {
    Point::new(
        nx * window.0 as f32 / scale,
        ny * window.1 as f32 / scale,
    )
}

/// Window-point coordinates to a logical position
pub fn mouse_position(x: i32, y: i32, scale: f32) -> Point {
    Point::new(x as f32 / scale, y as f32 / scale)
}

pub fn edit_key(keycode: sdl2::keyboard::Keycode) -> Option<EditKey> {
    use sdl2::keyboard::Keycode;
    match keycode {
        Keycode::Backspace => Some(EditKey::Backspace),
        Keycode::Delete => Some(EditKey::Delete),
        Keycode::Return | Keycode::KpEnter => Some(EditKey::Enter),
        Keycode::Left => Some(EditKey::Left),
        Keycode::Right => Some(EditKey::Right),
        Keycode::Home => Some(EditKey::Home),
        Keycode::End => Some(EditKey::End),
        _ => None,
    }
}

/// Translate one SDL event. `window` is the current window size in points.
/// Returns `true` when the event asked for a fullscreen toggle, which the
/// caller applies (it needs the window handle).
pub fn translate(
    event: &Event,
    window: (u32, u32),
    scale: f32,
    out: &mut Vec<InputEvent>,
) -> bool {
    match event {
        Event::Quit { .. } => out.push(InputEvent::CloseRequested),
        Event::Window {
            win_event: WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h),
            ..
        } => {
            out.push(InputEvent::Resized {
                size: Dimensions::new(*w as f32 / scale, *h as f32 / scale),
            });
        }
        Event::MouseMotion { x, y, .. } => {
            out.push(InputEvent::PointerMoved {
                pos: mouse_position(*x, *y, scale),
            });
        }
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => {
            out.push(InputEvent::PointerPressed {
                pos: mouse_position(*x, *y, scale),
            });
        }
        Event::MouseButtonUp {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => {
            out.push(InputEvent::PointerReleased {
                pos: mouse_position(*x, *y, scale),
            });
        }
        Event::MouseWheel {
            x,
            y,
            mouse_x,
            mouse_y,
            ..
        } => {
            // SDL positive y scrolls away from the user; flip to the shared
            // convention
            let delta = Vec2::new(-*x as f32, -*y as f32);
            if delta.x != 0.0 || delta.y != 0.0 {
                out.push(InputEvent::Wheel {
                    delta,
                    pos: mouse_position(*mouse_x, *mouse_y, scale),
                });
            }
        }
        Event::FingerDown {
            finger_id, x, y, ..
        } => {
            out.push(InputEvent::TouchDown {
                finger: *finger_id as u64,
                pos: finger_position(*x, *y, window, scale),
            });
        }
        Event::FingerMotion {
            finger_id, x, y, ..
        } => {
            out.push(InputEvent::TouchMoved {
                finger: *finger_id as u64,
                pos: finger_position(*x, *y, window, scale),
            });
        }
        Event::FingerUp {
            finger_id, x, y, ..
        } => {
            out.push(InputEvent::TouchUp {
                finger: *finger_id as u64,
                pos: finger_position(*x, *y, window, scale),
            });
        }
        Event::TextInput { text, .. } => {
            for c in text.chars().filter(|c| !c.is_control()) {
                out.push(InputEvent::Character(c));
            }
        }
        Event::KeyDown {
            keycode: Some(keycode),
            ..
        } => {
            if *keycode == sdl2::keyboard::Keycode::F11 {
                return true;
            }
            if let Some(edit) = edit_key(*keycode) {
                out.push(InputEvent::Edit(edit));
            }
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finger_positions_scale_from_normalized() {
        let pos = finger_position(0.5, 0.25, (800, 400), 2.0);
        assert_eq!(pos, Point::new(200.0, 50.0));
    }

    #[test]
    fn test_mouse_positions_divide_by_scale() {
        assert_eq!(mouse_position(300, 100, 2.0), Point::new(150.0, 50.0));
    }

    #[test]
    fn test_edit_key_mapping() {
        use sdl2::keyboard::Keycode;
        assert_eq!(edit_key(Keycode::Backspace), Some(EditKey::Backspace));
        assert_eq!(edit_key(Keycode::KpEnter), Some(EditKey::Enter));
        assert_eq!(edit_key(Keycode::A), None);
    }
}
