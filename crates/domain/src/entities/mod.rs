//! Domain entities

mod design;

pub use design::{Design, DesignLink};
