//! Quick design bar
//!
//! A fixed-capacity list of pinned designs the UI exposes for one-click
//! application. Resolving a slot snapshots whatever is pinned at that
//! moment into a `QuickSelection`, so one resolution pass sees one
//! consistent design even if the pin changes afterwards.

use std::sync::Arc;

use vestiary_domain::Design;

use crate::stand_in::QuickSelection;

/// Fixed-capacity pin list for quick selections
#[derive(Debug, Clone)]
pub struct QuickBar {
    slots: Vec<Option<Arc<Design>>>,
}

impl QuickBar {
    pub const DEFAULT_CAPACITY: usize = 8;

    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Pin a design to a slot. Out-of-range slots are ignored.
    pub fn pin(&mut self, slot: usize, design: Arc<Design>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(design);
        }
    }

    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    pub fn pinned(&self, slot: usize) -> Option<Arc<Design>> {
        self.slots.get(slot).and_then(Clone::clone)
    }

    /// Snapshot a slot into a quick selection. None for out-of-range slots;
    /// an in-range empty slot yields a selection with nothing pinned.
    pub fn resolve(&self, slot: usize) -> Option<QuickSelection> {
        if slot >= self.slots.len() {
            return None;
        }
        Some(QuickSelection {
            slot,
            pinned: self.pinned(slot),
        })
    }
}

impl Default for QuickBar {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
