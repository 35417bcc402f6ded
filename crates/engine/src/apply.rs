//! Flag-gated apply/merge
//!
//! Merges resolved design data into a live actor state, field by field.
//! The flags gate whole categories; the design's own selection bits gate
//! individual fields; the lock key gates ownership. Every call returns a
//! report of exactly what changed - mutation failures are reported, never
//! thrown.

use vestiary_domain::{
    ApplyFlags, ApplySelection, CustomizeIndex, DesignData, EquipSlot, LockKey, MaterialKey,
    MaterialOverrides, ToggleKind,
};

use crate::ports::ActorState;

/// One field the merge actually wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    Item(EquipSlot),
    Stain(EquipSlot),
    Customize(CustomizeIndex),
    Toggle(ToggleKind),
    Material(MaterialKey),
}

/// Why a mutating call was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The target is locked by a different owner
    LockHeld,
}

/// Overall outcome of one apply call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// At least one field changed
    Applied,
    /// Valid call, zero effective change
    NothingDone,
    /// All mutating categories were refused
    Rejected(RejectReason),
}

/// Result of one apply call; `changed` is empty (never absent) when
/// nothing changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub outcome: ApplyOutcome,
    pub changed: Vec<ChangedField>,
}

impl ApplyReport {
    fn nothing_done() -> Self {
        Self {
            outcome: ApplyOutcome::NothingDone,
            changed: Vec::new(),
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            outcome: ApplyOutcome::Rejected(reason),
            changed: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Merge resolved design data into the actor.
///
/// - Neither `EQUIPMENT` nor `CUSTOMIZATION` set: no-op, `NothingDone`.
/// - Target locked by a different key: every mutating category is refused
///   (`Rejected`); reads are unaffected. A matching key always passes.
/// - Equipment slots and customization attributes are copied only when the
///   value differs and the selection enables the field; materials ride
///   with the equipment category, toggles with customization.
/// - `LOCK` without `ONCE` establishes a standing lock under `key`; `ONCE`
///   retains nothing.
///
/// Applying the same data with the same flags twice reports `NothingDone`
/// the second time.
pub fn apply_design(
    resolved: &DesignData,
    selection: &ApplySelection,
    materials: &MaterialOverrides,
    actor: &mut dyn ActorState,
    flags: ApplyFlags,
    key: LockKey,
) -> ApplyReport {
    if !flags.intersects(ApplyFlags::EQUIPMENT | ApplyFlags::CUSTOMIZATION) {
        return ApplyReport::nothing_done();
    }

    let existing = actor.lock();
    if !existing.is_none() && existing != key {
        tracing::warn!(
            held_by = %existing,
            caller = %key,
            "Apply refused; target locked by a different owner"
        );
        return ApplyReport::rejected(RejectReason::LockHeld);
    }

    let mut changed = Vec::new();

    if flags.contains(ApplyFlags::EQUIPMENT) {
        for slot in EquipSlot::ALL {
            let current = actor.piece(slot);
            let wanted = resolved.piece(slot);
            let mut next = current;

            if selection.applies_item(slot) && !current.same_item(wanted) {
                next.item_id = wanted.item_id;
                next.variant = wanted.variant;
                changed.push(ChangedField::Item(slot));
            }
            if selection.applies_stain(slot) && current.stain != wanted.stain {
                next.stain = wanted.stain;
                changed.push(ChangedField::Stain(slot));
            }
            if next != current {
                actor.set_piece(slot, next);
            }
        }

        for (mat_key, value) in materials.iter() {
            if !value.enabled {
                continue;
            }
            if actor.material(*mat_key) != Some(*value) {
                actor.set_material(*mat_key, *value);
                changed.push(ChangedField::Material(*mat_key));
            }
        }
    }

    if flags.contains(ApplyFlags::CUSTOMIZATION) {
        for index in CustomizeIndex::ALL {
            if selection.applies_customize(index)
                && actor.customize(index) != resolved.customize(index)
            {
                actor.set_customize(index, resolved.customize(index));
                changed.push(ChangedField::Customize(index));
            }
        }
        for kind in ToggleKind::ALL {
            if selection.applies_toggle(kind) && actor.toggle(kind) != resolved.toggle(kind) {
                actor.set_toggle(kind, resolved.toggle(kind));
                changed.push(ChangedField::Toggle(kind));
            }
        }
    }

    if flags.contains(ApplyFlags::LOCK) && !flags.contains(ApplyFlags::ONCE) {
        actor.set_lock(key);
    }

    let outcome = if changed.is_empty() {
        ApplyOutcome::NothingDone
    } else {
        ApplyOutcome::Applied
    };
    tracing::debug!(changed = changed.len(), ?outcome, "Apply completed");

    ApplyReport { outcome, changed }
}

/// Release a standing lock. Returns true only when the key matched and the
/// lock was cleared; an unlocked target or a foreign key returns false.
pub fn unlock(actor: &mut dyn ActorState, key: LockKey) -> bool {
    let existing = actor.lock();
    if existing.is_none() || existing != key {
        return false;
    }
    actor.clear_lock();
    true
}
