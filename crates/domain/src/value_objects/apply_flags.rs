//! Apply flags and link masks
//!
//! `ApplyFlags` selects which state categories an apply operation may touch
//! and whether it locks the target. Hand-rolled bitmask newtypes; small bit
//! logic does not warrant a dependency in the domain layer.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bitmask gating one apply call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ApplyFlags(u8);

impl ApplyFlags {
    pub const NONE: Self = Self(0);
    /// Do not retain a standing lock after the apply
    pub const ONCE: Self = Self(1);
    /// Equipment slots (and material overrides) may be written
    pub const EQUIPMENT: Self = Self(1 << 1);
    /// Customization attributes (and toggles) may be written
    pub const CUSTOMIZATION: Self = Self(1 << 2);
    /// Establish a standing ownership token on the target
    pub const LOCK: Self = Self(1 << 3);

    /// Default for applying a stored design
    pub const DESIGN_DEFAULT: Self =
        Self(Self::ONCE.0 | Self::EQUIPMENT.0 | Self::CUSTOMIZATION.0);
    /// Default for applying externally owned state
    pub const STATE_DEFAULT: Self =
        Self(Self::EQUIPMENT.0 | Self::CUSTOMIZATION.0 | Self::LOCK.0);
    /// Default for reverting to game state
    pub const REVERT_DEFAULT: Self = Self(Self::EQUIPMENT.0 | Self::CUSTOMIZATION.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ApplyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ApplyFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ApplyFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Which categories a design link may touch when applied through automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationTypeMask(u8);

impl ApplicationTypeMask {
    pub const NONE: Self = Self(0);
    pub const EQUIPMENT: Self = Self(1);
    pub const CUSTOMIZATION: Self = Self(1 << 1);
    pub const ALL: Self = Self(Self::EQUIPMENT.0 | Self::CUSTOMIZATION.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reduce apply flags to the categories this mask allows
    pub fn restrict(self, flags: ApplyFlags) -> ApplyFlags {
        let mut out = flags & (ApplyFlags::ONCE | ApplyFlags::LOCK);
        if self.contains(Self::EQUIPMENT) && flags.contains(ApplyFlags::EQUIPMENT) {
            out |= ApplyFlags::EQUIPMENT;
        }
        if self.contains(Self::CUSTOMIZATION) && flags.contains(ApplyFlags::CUSTOMIZATION) {
            out |= ApplyFlags::CUSTOMIZATION;
        }
        out
    }
}

impl Default for ApplicationTypeMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Job classes a design link is restricted to, one bit per job id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobMask(pub u64);

impl JobMask {
    pub const NONE: Self = Self(0);
    pub const ANY: Self = Self(u64::MAX);

    pub fn single(job_id: u8) -> Self {
        Self(1u64 << (job_id as u32 % 64))
    }

    #[inline]
    pub fn matches(self, job_id: u8) -> bool {
        self.0 & (1u64 << (job_id as u32 % 64)) != 0
    }
}

impl Default for JobMask {
    fn default() -> Self {
        Self::ANY
    }
}

impl BitOr for JobMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
