//! Port traits for the engine's external collaborators.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - The design repository (persistence lives elsewhere; we only read)
//! - The live actor state (raw memory interop lives entirely behind this
//!   trait; the engine sees typed get/set per field)
//!
//! Everything is synchronous: resolution and application run to completion
//! on the caller's thread.

use std::sync::Arc;

use vestiary_domain::{
    CustomizeIndex, CustomizeValue, Design, DesignId, EquipSlot, EquipmentPiece, LockKey,
    MaterialKey, MaterialValueDesign, ToggleKind,
};

/// Read access to the stored design collection.
///
/// Iteration order is irrelevant; the path label is repository state
/// (folder placement), not part of the design entity.
#[cfg_attr(test, mockall::automock)]
pub trait DesignRepository: Send + Sync {
    fn designs(&self) -> Vec<Arc<Design>>;

    fn get(&self, id: DesignId) -> Option<Arc<Design>>;

    /// Filesystem-style path label for a design, e.g. `Outfits/Work/Casual`
    fn path_label(&self, id: DesignId) -> Option<String>;
}

/// Live actor state the engine merges into.
///
/// The engine borrows this for the duration of one apply call and never
/// owns it. The lock key guards mutation; callers that bypass the key must
/// serialize writes to the same actor externally.
#[cfg_attr(test, mockall::automock)]
pub trait ActorState {
    fn piece(&self, slot: EquipSlot) -> EquipmentPiece;
    fn set_piece(&mut self, slot: EquipSlot, piece: EquipmentPiece);

    fn customize(&self, index: CustomizeIndex) -> CustomizeValue;
    fn set_customize(&mut self, index: CustomizeIndex, value: CustomizeValue);

    fn toggle(&self, kind: ToggleKind) -> bool;
    fn set_toggle(&mut self, kind: ToggleKind, on: bool);

    fn material(&self, key: MaterialKey) -> Option<MaterialValueDesign>;
    fn set_material(&mut self, key: MaterialKey, value: MaterialValueDesign);

    /// Current standing lock; `LockKey::NONE` when unlocked
    fn lock(&self) -> LockKey;
    fn set_lock(&mut self, key: LockKey);
    fn clear_lock(&mut self);
}

/// Plain in-memory actor state.
///
/// Backs tests and callers that stage changes before committing them to
/// the real interop layer.
#[derive(Debug, Clone, Default)]
pub struct BufferedActor {
    data: vestiary_domain::DesignData,
    materials: vestiary_domain::MaterialOverrides,
    lock: LockKey,
}

impl BufferedActor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: vestiary_domain::DesignData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &vestiary_domain::DesignData {
        &self.data
    }

    pub fn materials(&self) -> &vestiary_domain::MaterialOverrides {
        &self.materials
    }
}

impl ActorState for BufferedActor {
    fn piece(&self, slot: EquipSlot) -> EquipmentPiece {
        self.data.piece(slot)
    }

    fn set_piece(&mut self, slot: EquipSlot, piece: EquipmentPiece) {
        self.data.set_piece(slot, piece);
    }

    fn customize(&self, index: CustomizeIndex) -> CustomizeValue {
        self.data.customize(index)
    }

    fn set_customize(&mut self, index: CustomizeIndex, value: CustomizeValue) {
        self.data.set_customize(index, value);
    }

    fn toggle(&self, kind: ToggleKind) -> bool {
        self.data.toggle(kind)
    }

    fn set_toggle(&mut self, kind: ToggleKind, on: bool) {
        self.data.set_toggle(kind, on);
    }

    fn material(&self, key: MaterialKey) -> Option<MaterialValueDesign> {
        self.materials.get(key).copied()
    }

    fn set_material(&mut self, key: MaterialKey, value: MaterialValueDesign) {
        self.materials.insert(key, value);
    }

    fn lock(&self) -> LockKey {
        self.lock
    }

    fn set_lock(&mut self, key: LockKey) {
        self.lock = key;
    }

    fn clear_lock(&mut self) {
        self.lock = LockKey::NONE;
    }
}

/// Snapshot the actor's current state as design data.
///
/// Used as the baseline a stand-in may pass through unchanged.
pub fn snapshot(actor: &dyn ActorState) -> vestiary_domain::DesignData {
    let mut data = vestiary_domain::DesignData::default();
    for slot in EquipSlot::ALL {
        data.set_piece(slot, actor.piece(slot));
    }
    for index in CustomizeIndex::ALL {
        data.set_customize(index, actor.customize(index));
    }
    for kind in ToggleKind::ALL {
        data.set_toggle(kind, actor.toggle(kind));
    }
    data
}
