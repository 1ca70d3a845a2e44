//! Dropdown widget
//!
//! A button that toggles a floating option list. At most one dropdown is
//! open per session; opening one implicitly closes any other because
//! openness is derived from the session's active-dropdown slot. A click
//! landing outside the dropdown's own elements closes it via the global
//! click notification.

use slate_engine::session::{ActiveSlots, Session, WidgetId};
use slate_core::ElementId;
use std::cell::RefCell;
use std::rc::Rc;

/// Collapsed button height in logical units
pub const DROPDOWN_HEIGHT: f32 = 40.0;
/// Height of one option row
pub const OPTION_HEIGHT: f32 = 36.0;
/// Inner padding of button and rows
pub const DROPDOWN_PADDING: f32 = 8.0;

type ChangeCallback = Box<dyn FnMut(usize, &str)>;

struct DropdownInner {
    options: Vec<String>,
    selected: usize,
    on_change: Option<ChangeCallback>,
    /// One of this dropdown's elements was hit by the click being
    /// dispatched; consumed by the global-click handler
    clicked: bool,
}

/// Shared handle to one dropdown
pub struct Dropdown {
    id: WidgetId,
    inner: Rc<RefCell<DropdownInner>>,
}

impl Dropdown {
    pub fn new(session: &mut Session) -> Self {
        Self {
            id: session.allocate_widget_id(),
            inner: Rc::new(RefCell::new(DropdownInner {
                options: Vec::new(),
                selected: 0,
                on_change: None,
                clicked: false,
            })),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn on_change(&self, callback: impl FnMut(usize, &str) + 'static) {
        self.inner.borrow_mut().on_change = Some(Box::new(callback));
    }

    pub fn add_option(&self, option: impl Into<String>) {
        self.inner.borrow_mut().options.push(option.into());
    }

    pub fn clear_options(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.options.clear();
        inner.selected = 0;
    }

    pub fn option_count(&self) -> usize {
        self.inner.borrow().options.len()
    }

    pub fn option(&self, index: usize) -> Option<String> {
        self.inner.borrow().options.get(index).cloned()
    }

    pub fn selected_index(&self) -> usize {
        self.inner.borrow().selected
    }

    pub fn selected_value(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner.options.get(inner.selected).cloned()
    }

    /// Change the selection without firing the callback
    pub fn set_selected(&self, index: usize) {
        let mut inner = self.inner.borrow_mut();
        if index < inner.options.len() {
            inner.selected = index;
        }
    }

    pub fn is_open(&self, slots: &ActiveSlots) -> bool {
        slots.dropdown_is_open(self.id)
    }

    pub fn open(&self, slots: &mut ActiveSlots) {
        slots.open_dropdown(self.id);
    }

    pub fn close(&self, slots: &mut ActiveSlots) {
        slots.close_dropdown(self.id);
    }

    /// Wire the dropdown to its layout elements: the toggle button and one
    /// element per option row (emitted only while open). Also registers the
    /// click-outside close behavior.
    pub fn bind(&self, session: &mut Session, button: ElementId, options: &[(usize, ElementId)]) {
        let id = self.id;
        let inner = Rc::clone(&self.inner);
        session.on_click(button, move |_, slots| {
            inner.borrow_mut().clicked = true;
            if slots.dropdown_is_open(id) {
                slots.close_dropdown(id);
            } else {
                slots.open_dropdown(id);
            }
        });

        for (index, element) in options.iter().copied() {
            let inner = Rc::clone(&self.inner);
            session.on_click(element, move |_, slots| {
                let mut dropdown = inner.borrow_mut();
                dropdown.clicked = true;
                if !slots.dropdown_is_open(id) {
                    return;
                }
                if index >= dropdown.options.len() {
                    tracing::warn!(index, "dropdown option out of range");
                    return;
                }
                dropdown.selected = index;
                slots.close_dropdown(id);
                let value = dropdown.options[index].clone();
                if let Some(callback) = dropdown.on_change.as_mut() {
                    callback(index, &value);
                }
            });
        }

        let inner = Rc::clone(&self.inner);
        session.on_global_click(move |_, _, slots| {
            let mut dropdown = inner.borrow_mut();
            if dropdown.clicked {
                dropdown.clicked = false;
                return;
            }
            slots.close_dropdown(id);
        });
    }
}

impl Clone for Dropdown {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_engine::testing::FixtureLayout;
    use slate_core::{Point, Rect};
    use std::cell::Cell;

    const BUTTON: ElementId = ElementId(1);
    const OPTION_0: ElementId = ElementId(2);
    const OPTION_1: ElementId = ElementId(3);

    fn layout_with_options() -> FixtureLayout {
        let mut layout = FixtureLayout::default();
        layout.add_element(BUTTON, Rect::new(0.0, 0.0, 300.0, DROPDOWN_HEIGHT));
        layout.add_element(OPTION_0, Rect::new(0.0, 44.0, 300.0, OPTION_HEIGHT));
        layout.add_element(OPTION_1, Rect::new(0.0, 80.0, 300.0, OPTION_HEIGHT));
        layout
    }

    fn dropdown_with_options(session: &mut Session) -> Dropdown {
        let dropdown = Dropdown::new(session);
        dropdown.add_option("alpha");
        dropdown.add_option("beta");
        dropdown.bind(session, BUTTON, &[(0, OPTION_0), (1, OPTION_1)]);
        dropdown
    }

    #[test]
    fn test_button_click_toggles() {
        let layout = layout_with_options();
        let mut session = Session::new();
        let dropdown = dropdown_with_options(&mut session);

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert!(dropdown.is_open(&session.slots));

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert!(!dropdown.is_open(&session.slots));
    }

    #[test]
    fn test_option_click_selects_and_closes() {
        let layout = layout_with_options();
        let mut session = Session::new();
        let dropdown = dropdown_with_options(&mut session);

        let changes = Rc::new(Cell::new(None));
        let sink = Rc::clone(&changes);
        dropdown.on_change(move |index, value| sink.set(Some((index, value.to_string()))));

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        session.dispatch_click(Point::new(10.0, 90.0), &layout);

        assert!(!dropdown.is_open(&session.slots));
        assert_eq!(dropdown.selected_index(), 1);
        assert_eq!(dropdown.selected_value().as_deref(), Some("beta"));
        let (index, value) = changes.take().unwrap();
        assert_eq!((index, value.as_str()), (1, "beta"));
    }

    #[test]
    fn test_click_outside_closes() {
        let layout = layout_with_options();
        let mut session = Session::new();
        let dropdown = dropdown_with_options(&mut session);

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert!(dropdown.is_open(&session.slots));

        session.dispatch_click(Point::new(500.0, 500.0), &layout);
        assert!(!dropdown.is_open(&session.slots));
    }

    #[test]
    fn test_opening_second_dropdown_closes_first() {
        let mut layout = layout_with_options();
        let second_button = ElementId(9);
        layout.add_element(second_button, Rect::new(400.0, 0.0, 300.0, DROPDOWN_HEIGHT));

        let mut session = Session::new();
        let first = dropdown_with_options(&mut session);
        let second = Dropdown::new(&mut session);
        second.add_option("gamma");
        second.bind(&mut session, second_button, &[]);

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert!(first.is_open(&session.slots));

        session.dispatch_click(Point::new(450.0, 10.0), &layout);
        assert!(!first.is_open(&session.slots));
        assert!(second.is_open(&session.slots));
    }

    #[test]
    fn test_option_click_while_closed_is_ignored() {
        let layout = layout_with_options();
        let mut session = Session::new();
        let dropdown = dropdown_with_options(&mut session);

        // Straight to an option without opening: selection unchanged
        session.dispatch_click(Point::new(10.0, 90.0), &layout);
        assert_eq!(dropdown.selected_index(), 0);
    }

    #[test]
    fn test_set_selected_bounds_checked() {
        let mut session = Session::new();
        let dropdown = Dropdown::new(&mut session);
        dropdown.add_option("only");
        dropdown.set_selected(5);
        assert_eq!(dropdown.selected_index(), 0);
    }
}
