//! Per-frame scroll container registry
//!
//! The command interpreter registers every scroll container it encounters
//! while walking the command list. A container not re-registered during a
//! frame is implicitly closed and dropped at the end of that frame's pass,
//! so the registry is always the set of containers that were actually on
//! screen most recently. Input processing hit-tests against it on the
//! following frame.

use slate_core::ElementId;

/// One registered scroll container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollContainerRef {
    pub id: ElementId,
    /// Re-registered during the current interpreter pass
    pub seen: bool,
}

/// The frame-scoped set of live scroll containers
#[derive(Clone, Debug, Default)]
pub struct ScrollRegistry {
    entries: Vec<ScrollContainerRef>,
}

impl ScrollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an interpreter pass: everything becomes unseen until
    /// re-registered
    pub fn begin_frame(&mut self) {
        for entry in &mut self.entries {
            entry.seen = false;
        }
    }

    /// Register a container for this frame. Re-registering an id already
    /// present marks it seen without duplicating the entry.
    pub fn register(&mut self, id: ElementId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.seen = true;
        } else {
            self.entries.push(ScrollContainerRef { id, seen: true });
        }
    }

    /// Finish the pass: containers that were not re-registered are closed
    pub fn end_frame(&mut self) {
        self.entries.retain(|e| {
            if !e.seen {
                tracing::trace!(id = e.id.0, "scroll container closed");
            }
            e.seen
        });
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScrollContainerRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistration_does_not_duplicate() {
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ElementId(1));
        registry.register(ElementId(1));
        registry.end_frame();
        assert_eq!(registry.len(), 1);

        // Same container across consecutive frames stays a single entry
        registry.begin_frame();
        registry.register(ElementId(1));
        registry.end_frame();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_absent_container_is_closed() {
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ElementId(1));
        registry.register(ElementId(2));
        registry.end_frame();
        assert_eq!(registry.len(), 2);

        registry.begin_frame();
        registry.register(ElementId(2));
        registry.end_frame();
        assert!(!registry.contains(ElementId(1)));
        assert!(registry.contains(ElementId(2)));
    }

    #[test]
    fn test_empty_frame_closes_everything() {
        let mut registry = ScrollRegistry::new();
        registry.begin_frame();
        registry.register(ElementId(7));
        registry.end_frame();

        registry.begin_frame();
        registry.end_frame();
        assert!(registry.is_empty());
    }
}
