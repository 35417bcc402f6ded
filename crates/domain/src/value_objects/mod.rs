//! Value objects for the design domain

mod apply_flags;
mod apply_selection;
mod design_data;
mod materials;

pub use apply_flags::{ApplicationTypeMask, ApplyFlags, JobMask};
pub use apply_selection::ApplySelection;
pub use design_data::{
    CustomizeIndex, CustomizeValue, DesignData, EquipSlot, EquipmentPiece, StainId, ToggleKind,
};
pub use materials::{MaterialKey, MaterialOverrides, MaterialValueDesign};
