//! Per-field enable bits carried by a stored design
//!
//! A design may exclude individual slots, stains, customization attributes,
//! or toggles from being applied. The merge consults these bits before
//! copying a field; everything defaults to enabled.

use serde::{Deserialize, Serialize};

use super::design_data::{CustomizeIndex, EquipSlot, ToggleKind};

/// Fine-grained apply enable bits for one design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySelection {
    apply_item: [bool; EquipSlot::COUNT],
    apply_stain: [bool; EquipSlot::COUNT],
    apply_customize: [bool; CustomizeIndex::COUNT],
    apply_toggle: [bool; ToggleKind::COUNT],
}

impl Default for ApplySelection {
    fn default() -> Self {
        Self {
            apply_item: [true; EquipSlot::COUNT],
            apply_stain: [true; EquipSlot::COUNT],
            apply_customize: [true; CustomizeIndex::COUNT],
            apply_toggle: [true; ToggleKind::COUNT],
        }
    }
}

impl ApplySelection {
    /// Everything enabled
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything disabled
    pub fn none() -> Self {
        Self {
            apply_item: [false; EquipSlot::COUNT],
            apply_stain: [false; EquipSlot::COUNT],
            apply_customize: [false; CustomizeIndex::COUNT],
            apply_toggle: [false; ToggleKind::COUNT],
        }
    }

    pub fn applies_item(&self, slot: EquipSlot) -> bool {
        self.apply_item[slot.index()]
    }

    pub fn set_apply_item(&mut self, slot: EquipSlot, apply: bool) {
        self.apply_item[slot.index()] = apply;
    }

    pub fn applies_stain(&self, slot: EquipSlot) -> bool {
        self.apply_stain[slot.index()]
    }

    pub fn set_apply_stain(&mut self, slot: EquipSlot, apply: bool) {
        self.apply_stain[slot.index()] = apply;
    }

    pub fn applies_customize(&self, index: CustomizeIndex) -> bool {
        self.apply_customize[index.index()]
    }

    pub fn set_apply_customize(&mut self, index: CustomizeIndex, apply: bool) {
        self.apply_customize[index.index()] = apply;
    }

    pub fn applies_toggle(&self, kind: ToggleKind) -> bool {
        self.apply_toggle[kind.index()]
    }

    pub fn set_apply_toggle(&mut self, kind: ToggleKind, apply: bool) {
        self.apply_toggle[kind.index()] = apply;
    }
}
