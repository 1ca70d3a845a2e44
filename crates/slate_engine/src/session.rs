//! UI interaction session
//!
//! The session is the seam between the shell and the widget layer: widgets
//! register typed hover/click observers against element ids, and the shell
//! dispatches into them when a click or hover resolves. A "global click"
//! notification runs after the per-element handlers of every dispatched
//! click so open dropdowns can close and focused inputs can blur when a
//! click lands outside them.
//!
//! Single-active-instance semantics (one open dropdown, one modal, one
//! focused text input) live in [`ActiveSlots`] as plain `Option<WidgetId>`
//! fields. Widgets derive their open/focused state from the slot: writing a
//! new id into a slot implicitly closes the previous occupant. Handlers
//! receive `&mut ActiveSlots` so they can claim and release slots without
//! re-entering the session mid-dispatch.

use crate::layout::LayoutEngine;
use rustc_hash::FxHashMap;
use slate_core::{ElementId, Point};

/// Process-unique widget identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// The single-active-instance bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveSlots {
    active_dropdown: Option<WidgetId>,
    active_modal: Option<WidgetId>,
    focused_input: Option<WidgetId>,
}

impl ActiveSlots {
    pub fn open_dropdown(&mut self, id: WidgetId) {
        self.active_dropdown = Some(id);
    }

    /// Close the dropdown only if `id` is the one open
    pub fn close_dropdown(&mut self, id: WidgetId) {
        if self.active_dropdown == Some(id) {
            self.active_dropdown = None;
        }
    }

    pub fn close_any_dropdown(&mut self) {
        self.active_dropdown = None;
    }

    pub fn dropdown_is_open(&self, id: WidgetId) -> bool {
        self.active_dropdown == Some(id)
    }

    pub fn active_dropdown(&self) -> Option<WidgetId> {
        self.active_dropdown
    }

    pub fn open_modal(&mut self, id: WidgetId) {
        self.active_modal = Some(id);
    }

    pub fn close_modal(&mut self, id: WidgetId) {
        if self.active_modal == Some(id) {
            self.active_modal = None;
        }
    }

    pub fn modal_is_open(&self, id: WidgetId) -> bool {
        self.active_modal == Some(id)
    }

    pub fn active_modal(&self) -> Option<WidgetId> {
        self.active_modal
    }

    pub fn focus(&mut self, id: WidgetId) {
        self.focused_input = Some(id);
    }

    /// Blur the input only if `id` holds focus
    pub fn blur(&mut self, id: WidgetId) {
        if self.focused_input == Some(id) {
            self.focused_input = None;
        }
    }

    pub fn blur_any(&mut self) {
        self.focused_input = None;
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused_input == Some(id)
    }

    pub fn focused_input(&self) -> Option<WidgetId> {
        self.focused_input
    }
}

type PointerHandler = Box<dyn FnMut(Point, &mut ActiveSlots)>;
type GlobalClickHandler = Box<dyn FnMut(Point, bool, &mut ActiveSlots)>;

/// Widget-facing interaction state for one shell
#[derive(Default)]
pub struct Session {
    next_widget: u64,
    click_observers: FxHashMap<ElementId, Vec<PointerHandler>>,
    hover_observers: FxHashMap<ElementId, Vec<PointerHandler>>,
    global_click: Vec<GlobalClickHandler>,
    /// Which dropdown/modal/input is live right now
    pub slots: ActiveSlots,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh widget id
    pub fn allocate_widget_id(&mut self) -> WidgetId {
        self.next_widget += 1;
        WidgetId(self.next_widget)
    }

    /// Run `handler` when a click resolves inside `element`'s geometry
    pub fn on_click(
        &mut self,
        element: ElementId,
        handler: impl FnMut(Point, &mut ActiveSlots) + 'static,
    ) {
        self.click_observers
            .entry(element)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run `handler` every frame the pointer is inside `element`'s geometry
    pub fn on_hover(
        &mut self,
        element: ElementId,
        handler: impl FnMut(Point, &mut ActiveSlots) + 'static,
    ) {
        self.hover_observers
            .entry(element)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run `handler` after every dispatched click; the flag says whether
    /// any element observer was hit
    pub fn on_global_click(
        &mut self,
        handler: impl FnMut(Point, bool, &mut ActiveSlots) + 'static,
    ) {
        self.global_click.push(Box::new(handler));
    }

    /// Drop every observer (apps that re-register during each build)
    pub fn clear_observers(&mut self) {
        self.click_observers.clear();
        self.hover_observers.clear();
        self.global_click.clear();
    }

    /// Deliver a click at `pos`: element observers whose geometry contains
    /// the point run first, then every global handler. Returns whether any
    /// element observer was hit.
    pub fn dispatch_click(&mut self, pos: Point, layout: &dyn LayoutEngine) -> bool {
        let Self {
            click_observers,
            global_click,
            slots,
            ..
        } = self;

        let mut hit = false;
        for (element, handlers) in click_observers.iter_mut() {
            let inside = layout
                .element_geometry(*element)
                .is_some_and(|bounds| bounds.contains(pos));
            if inside {
                hit = true;
                for handler in handlers {
                    handler(pos, slots);
                }
            }
        }
        for handler in global_click.iter_mut() {
            handler(pos, hit, slots);
        }
        hit
    }

    /// Deliver per-frame hover notifications
    pub fn dispatch_hover(&mut self, pos: Point, layout: &dyn LayoutEngine) {
        let Self {
            hover_observers,
            slots,
            ..
        } = self;
        for (element, handlers) in hover_observers.iter_mut() {
            let inside = layout
                .element_geometry(*element)
                .is_some_and(|bounds| bounds.contains(pos));
            if inside {
                for handler in handlers {
                    handler(pos, slots);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureLayout;
    use slate_core::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_click_dispatch_respects_geometry() {
        let mut layout = FixtureLayout::default();
        layout.add_element(ElementId(1), Rect::new(0.0, 0.0, 100.0, 40.0));

        let mut session = Session::new();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        session.on_click(ElementId(1), move |_, _| counter.set(counter.get() + 1));

        assert!(session.dispatch_click(Point::new(50.0, 20.0), &layout));
        assert!(!session.dispatch_click(Point::new(200.0, 200.0), &layout));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_global_click_sees_hit_flag() {
        let mut layout = FixtureLayout::default();
        layout.add_element(ElementId(1), Rect::new(0.0, 0.0, 100.0, 40.0));

        let mut session = Session::new();
        session.on_click(ElementId(1), |_, _| {});
        let observed = Rc::new(Cell::new(None));
        let sink = Rc::clone(&observed);
        session.on_global_click(move |_, hit, _| sink.set(Some(hit)));

        session.dispatch_click(Point::new(50.0, 20.0), &layout);
        assert_eq!(observed.get(), Some(true));

        session.dispatch_click(Point::new(500.0, 500.0), &layout);
        assert_eq!(observed.get(), Some(false));
    }

    #[test]
    fn test_handlers_can_mutate_slots_mid_dispatch() {
        let mut layout = FixtureLayout::default();
        layout.add_element(ElementId(1), Rect::new(0.0, 0.0, 100.0, 40.0));

        let mut session = Session::new();
        let id = session.allocate_widget_id();
        session.on_click(ElementId(1), move |_, slots| slots.open_dropdown(id));

        session.dispatch_click(Point::new(10.0, 10.0), &layout);
        assert_eq!(session.slots.active_dropdown(), Some(id));
    }

    #[test]
    fn test_opening_a_dropdown_displaces_the_previous() {
        let mut session = Session::new();
        let first = session.allocate_widget_id();
        let second = session.allocate_widget_id();

        session.slots.open_dropdown(first);
        assert!(session.slots.dropdown_is_open(first));

        session.slots.open_dropdown(second);
        assert!(!session.slots.dropdown_is_open(first));
        assert!(session.slots.dropdown_is_open(second));
    }

    #[test]
    fn test_close_only_clears_owner() {
        let mut session = Session::new();
        let a = session.allocate_widget_id();
        let b = session.allocate_widget_id();

        session.slots.focus(a);
        session.slots.blur(b);
        assert_eq!(session.slots.focused_input(), Some(a));
        session.slots.blur(a);
        assert_eq!(session.slots.focused_input(), None);
    }

    #[test]
    fn test_hover_dispatch() {
        let mut layout = FixtureLayout::default();
        layout.add_element(ElementId(1), Rect::new(0.0, 0.0, 100.0, 40.0));

        let mut session = Session::new();
        let hovers = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hovers);
        session.on_hover(ElementId(1), move |_, _| counter.set(counter.get() + 1));

        session.dispatch_hover(Point::new(1.0, 1.0), &layout);
        session.dispatch_hover(Point::new(500.0, 1.0), &layout);
        assert_eq!(hovers.get(), 1);
    }
}
