//! Modal dialog widget
//!
//! Open/close state plus a backdrop-click dismissal. The session's
//! active-modal slot enforces one live modal; the application emits the
//! backdrop and content elements only while the modal reports open.

use slate_engine::session::{ActiveSlots, Session, WidgetId};
use slate_core::ElementId;
use std::cell::RefCell;
use std::rc::Rc;

type CloseCallback = Box<dyn FnMut()>;

struct ModalInner {
    width: f32,
    height: f32,
    on_close: Option<CloseCallback>,
}

/// Shared handle to one modal
pub struct Modal {
    id: WidgetId,
    inner: Rc<RefCell<ModalInner>>,
}

impl Modal {
    pub fn new(session: &mut Session, width: f32, height: f32) -> Self {
        Self {
            id: session.allocate_widget_id(),
            inner: Rc::new(RefCell::new(ModalInner {
                width,
                height,
                on_close: None,
            })),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn size(&self) -> (f32, f32) {
        let inner = self.inner.borrow();
        (inner.width, inner.height)
    }

    pub fn on_close(&self, callback: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_close = Some(Box::new(callback));
    }

    pub fn is_open(&self, slots: &ActiveSlots) -> bool {
        slots.modal_is_open(self.id)
    }

    pub fn open(&self, slots: &mut ActiveSlots) {
        slots.open_modal(self.id);
    }

    /// Close and fire the close callback if this modal was open
    pub fn close(&self, slots: &mut ActiveSlots) {
        if !slots.modal_is_open(self.id) {
            return;
        }
        slots.close_modal(self.id);
        if let Some(callback) = self.inner.borrow_mut().on_close.as_mut() {
            callback();
        }
    }

    /// Clicking the backdrop element dismisses the modal
    pub fn bind_backdrop(&self, session: &mut Session, backdrop: ElementId) {
        let id = self.id;
        let inner = Rc::clone(&self.inner);
        session.on_click(backdrop, move |_, slots| {
            if !slots.modal_is_open(id) {
                return;
            }
            slots.close_modal(id);
            if let Some(callback) = inner.borrow_mut().on_close.as_mut() {
                callback();
            }
        });
    }
}

impl Clone for Modal {
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

    const BACKDROP: ElementId = ElementId(1);

    #[test]
    fn test_open_close_cycle() {
        let mut session = Session::new();
        let modal = Modal::new(&mut session, 400.0, 300.0);

        assert!(!modal.is_open(&session.slots));
        modal.open(&mut session.slots);
        assert!(modal.is_open(&session.slots));
        modal.close(&mut session.slots);
        assert!(!modal.is_open(&session.slots));
    }

    #[test]
    fn test_backdrop_click_dismisses_and_notifies() {
        let mut layout = FixtureLayout::default();
        layout.add_element(BACKDROP, Rect::new(0.0, 0.0, 800.0, 600.0));

        let mut session = Session::new();
        let modal = Modal::new(&mut session, 400.0, 300.0);
        let closed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&closed);
        modal.on_close(move || counter.set(counter.get() + 1));
        modal.bind_backdrop(&mut session, BACKDROP);

        modal.open(&mut session.slots);
        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert!(!modal.is_open(&session.slots));
        assert_eq!(closed.get(), 1);

        // A click while closed does not re-notify
        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_close_when_not_open_is_silent() {
        let mut session = Session::new();
        let modal = Modal::new(&mut session, 100.0, 100.0);
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        modal.on_close(move || flag.set(true));

        modal.close(&mut session.slots);
        assert!(!closed.get());
    }

    #[test]
    fn test_second_modal_displaces_first() {
        let mut session = Session::new();
        let first = Modal::new(&mut session, 100.0, 100.0);
        let second = Modal::new(&mut session, 100.0, 100.0);

        first.open(&mut session.slots);
        second.open(&mut session.slots);
        assert!(!first.is_open(&session.slots));
        assert!(second.is_open(&session.slots));
    }
}
