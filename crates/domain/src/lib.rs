//! Vestiary domain layer
//!
//! Pure value objects, entities, and predicates for design resolution.
//! No I/O, no randomness; drawing and application live in the engine crate.

pub mod entities;
pub mod error;
pub mod ids;
pub mod predicate;
pub mod value_objects;

pub use entities::{Design, DesignLink};
pub use error::DomainError;
pub use ids::{DesignId, LockKey};
pub use predicate::{
    format_restrictions, matches_any, parse_restrictions, DesignFacts, DesignPredicate,
};
pub use value_objects::{
    ApplicationTypeMask, ApplyFlags, ApplySelection, CustomizeIndex, CustomizeValue, DesignData,
    EquipSlot, EquipmentPiece, JobMask, MaterialKey, MaterialOverrides, MaterialValueDesign,
    StainId, ToggleKind,
};
