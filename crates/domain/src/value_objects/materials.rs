//! Material value overrides
//!
//! Shader/color parameter overrides keyed by material. The collection keeps
//! first-insertion order and unique keys; inserting an existing key replaces
//! the value in place.

use serde::{Deserialize, Serialize};

/// Identifies one material parameter block on an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialKey(pub u32);

/// One shader parameter override
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialValueDesign {
    /// Diffuse color in linear RGB
    pub color: [f32; 3],
    pub gloss: f32,
    /// Disabled entries are carried but not applied
    pub enabled: bool,
}

impl Default for MaterialValueDesign {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            gloss: 0.0,
            enabled: true,
        }
    }
}

/// Order-preserving unique-key collection of material overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MaterialOverrides(Vec<(MaterialKey, MaterialValueDesign)>);

impl MaterialOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping first-insertion order for existing keys
    pub fn insert(&mut self, key: MaterialKey, value: MaterialValueDesign) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: MaterialKey) -> Option<&MaterialValueDesign> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(MaterialKey, MaterialValueDesign)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MaterialKey, MaterialValueDesign)> for MaterialOverrides {
    fn from_iter<I: IntoIterator<Item = (MaterialKey, MaterialValueDesign)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (key, value) in iter {
            overrides.insert(key, value);
        }
        overrides
    }
}
