//! Fixed-size font slot table
//!
//! Fonts are addressed by small integer handles so the layout engine and
//! render commands can refer to them without owning native resources. Both
//! backends reuse this table with their own native font type.

use crate::error::{EngineError, Result};
use slate_core::FontId;

/// Number of slots in the table
pub const FONT_SLOTS: usize = 32;

/// Slot table mapping [`FontId`] to a backend's native font resource
pub struct FontTable<F> {
    slots: [Option<F>; FONT_SLOTS],
}

impl<F> Default for FontTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FontTable<F> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Place a loaded font into `slot`, replacing any previous occupant
    pub fn load(&mut self, slot: u16, font: F) -> Result<FontId> {
        let index = usize::from(slot);
        if index >= FONT_SLOTS {
            return Err(EngineError::InvalidFontSlot {
                slot,
                capacity: FONT_SLOTS,
            });
        }
        if self.slots[index].is_some() {
            tracing::debug!(slot, "replacing font slot");
        }
        self.slots[index] = Some(font);
        Ok(FontId(slot))
    }

    /// Clear a slot; out-of-range or empty slots are ignored
    pub fn unload(&mut self, font: FontId) {
        if let Some(slot) = self.slots.get_mut(usize::from(font.0)) {
            *slot = None;
        }
    }

    pub fn get(&self, font: FontId) -> Option<&F> {
        self.slots.get(usize::from(font.0))?.as_ref()
    }

    pub fn contains(&self, font: FontId) -> bool {
        self.get(font).is_some()
    }

    /// Drop every loaded font (backend teardown)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_get_unload() {
        let mut table: FontTable<&str> = FontTable::new();
        let id = table.load(3, "mono").unwrap();
        assert_eq!(id, FontId(3));
        assert_eq!(table.get(id), Some(&"mono"));

        table.unload(id);
        assert!(!table.contains(id));
    }

    #[test]
    fn test_out_of_range_slot_is_an_error() {
        let mut table: FontTable<&str> = FontTable::new();
        let err = table.load(FONT_SLOTS as u16, "nope").unwrap_err();
        assert!(matches!(err, EngineError::InvalidFontSlot { slot: 32, .. }));
    }

    #[test]
    fn test_load_replaces_occupied_slot() {
        let mut table: FontTable<&str> = FontTable::new();
        table.load(0, "first").unwrap();
        table.load(0, "second").unwrap();
        assert_eq!(table.get(FontId(0)), Some(&"second"));
    }

    #[test]
    fn test_unload_out_of_range_is_a_noop() {
        let mut table: FontTable<&str> = FontTable::new();
        table.unload(FontId(200));
    }

    #[test]
    fn test_clear_empties_every_slot() {
        let mut table: FontTable<&str> = FontTable::new();
        table.load(0, "a").unwrap();
        table.load(31, "b").unwrap();
        table.clear();
        assert!(!table.contains(FontId(0)));
        assert!(!table.contains(FontId(31)));
    }
}
