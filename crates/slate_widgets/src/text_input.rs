//! Single-line text input
//!
//! Editing state machine: character insertion at a cursor, backspace and
//! delete, arrow/home/end movement, enter-to-submit, and a blinking cursor
//! that resets to visible on every edit. Focus is session-scoped: clicking
//! the input claims the focused-input slot, a click anywhere else releases
//! it through the global click notification.
//!
//! The cursor is a character index; all string surgery converts through
//! `char_indices` so multi-byte input is safe.

use slate_engine::session::{ActiveSlots, Session, WidgetId};
use slate_core::{EditKey, ElementId, InputState};
use std::cell::RefCell;
use std::rc::Rc;

/// Seconds per cursor blink half-period
pub const CURSOR_BLINK_RATE: f32 = 0.53;

/// Maximum content length in characters
pub const MAX_LENGTH: usize = 256;

type TextCallback = Box<dyn FnMut(&str)>;

struct TextInputInner {
    text: String,
    /// Cursor position in characters, 0..=char_count
    cursor: usize,
    blink_timer: f32,
    cursor_visible: bool,
    clicked: bool,
    on_change: Option<TextCallback>,
    on_submit: Option<TextCallback>,
}

impl TextInputInner {
    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn notify_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            let text = std::mem::take(&mut self.text);
            callback(&text);
            self.text = text;
        }
    }

    fn reset_blink(&mut self) {
        self.cursor_visible = true;
        self.blink_timer = 0.0;
    }

    fn insert(&mut self, c: char) {
        if c.is_control() || self.char_count() >= MAX_LENGTH {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        self.reset_blink();
        self.notify_change();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.reset_blink();
        self.notify_change();
    }

    fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.reset_blink();
        self.notify_change();
    }
}

/// Shared handle to one text input
pub struct TextInput {
    id: WidgetId,
    inner: Rc<RefCell<TextInputInner>>,
}

impl TextInput {
    pub fn new(session: &mut Session) -> Self {
        Self {
            id: session.allocate_widget_id(),
            inner: Rc::new(RefCell::new(TextInputInner {
                text: String::new(),
                cursor: 0,
                blink_timer: 0.0,
                cursor_visible: true,
                clicked: false,
                on_change: None,
                on_submit: None,
            })),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn on_change(&self, callback: impl FnMut(&str) + 'static) {
        self.inner.borrow_mut().on_change = Some(Box::new(callback));
    }

    pub fn on_submit(&self, callback: impl FnMut(&str) + 'static) {
        self.inner.borrow_mut().on_submit = Some(Box::new(callback));
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Replace the content; cursor moves to the end and on_change fires
    pub fn set_text(&self, text: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.text = text.chars().take(MAX_LENGTH).collect();
        inner.cursor = inner.char_count();
        inner.reset_blink();
        inner.notify_change();
    }

    pub fn clear(&self) {
        self.set_text("");
    }

    /// Cursor position in characters
    pub fn cursor_position(&self) -> usize {
        self.inner.borrow().cursor
    }

    /// Whether the blinking cursor is currently in its visible half-period
    pub fn cursor_visible(&self) -> bool {
        self.inner.borrow().cursor_visible
    }

    /// Content split at the cursor, for rendering text-cursor-text
    pub fn split_at_cursor(&self) -> (String, String) {
        let inner = self.inner.borrow();
        let at = inner.byte_index(inner.cursor);
        (inner.text[..at].to_string(), inner.text[at..].to_string())
    }

    pub fn is_focused(&self, slots: &ActiveSlots) -> bool {
        slots.is_focused(self.id)
    }

    pub fn focus(&self, slots: &mut ActiveSlots) {
        slots.focus(self.id);
        let mut inner = self.inner.borrow_mut();
        inner.cursor = inner.char_count();
        inner.reset_blink();
    }

    pub fn blur(&self, slots: &mut ActiveSlots) {
        slots.blur(self.id);
        self.inner.borrow_mut().cursor_visible = false;
    }

    /// Wire the input to its layout element: click focuses, a click
    /// anywhere else blurs
    pub fn bind(&self, session: &mut Session, element: ElementId) {
        let id = self.id;
        let inner = Rc::clone(&self.inner);
        session.on_click(element, move |_, slots| {
            let mut input = inner.borrow_mut();
            input.clicked = true;
            slots.focus(id);
            input.cursor = input.char_count();
            input.reset_blink();
        });

        let inner = Rc::clone(&self.inner);
        session.on_global_click(move |_, _, slots| {
            let mut input = inner.borrow_mut();
            if input.clicked {
                input.clicked = false;
                return;
            }
            if slots.is_focused(id) {
                slots.blur(id);
                input.cursor_visible = false;
            }
        });
    }

    /// Consume this frame's typed characters and edit keys. Does nothing
    /// while unfocused.
    pub fn update(&self, input: &InputState, slots: &ActiveSlots) {
        if !slots.is_focused(self.id) {
            return;
        }
        let mut inner = self.inner.borrow_mut();

        inner.blink_timer += input.delta_time;
        while inner.blink_timer >= CURSOR_BLINK_RATE {
            inner.blink_timer -= CURSOR_BLINK_RATE;
            inner.cursor_visible = !inner.cursor_visible;
        }

        for c in &input.characters {
            inner.insert(*c);
        }
        for edit in &input.edits {
            match edit {
                EditKey::Backspace => inner.backspace(),
                EditKey::Delete => inner.delete(),
                EditKey::Left => {
                    if inner.cursor > 0 {
                        inner.cursor -= 1;
                        inner.reset_blink();
                    }
                }
                EditKey::Right => {
                    if inner.cursor < inner.char_count() {
                        inner.cursor += 1;
                        inner.reset_blink();
                    }
                }
                EditKey::Home => {
                    inner.cursor = 0;
                    inner.reset_blink();
                }
                EditKey::End => {
                    inner.cursor = inner.char_count();
                    inner.reset_blink();
                }
                EditKey::Enter => {
                    if inner.on_submit.is_some() {
                        let text = std::mem::take(&mut inner.text);
                        if let Some(callback) = inner.on_submit.as_mut() {
                            callback(&text);
                        }
                        inner.text = text;
                    }
                }
            }
        }
    }
}

impl Clone for TextInput {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Rc::clone(&self.inner),
        }
    }
}
