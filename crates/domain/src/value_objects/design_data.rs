//! Design data snapshot - the value type every apply operation merges from
//!
//! A `DesignData` is an immutable-by-convention snapshot of everything a
//! design can say about an actor's appearance: one piece per equipment slot,
//! one value per customization attribute, and the four meta toggles. It is
//! produced once by a resolution pass and copied by value when merged.

use serde::{Deserialize, Serialize};

/// Equipment slot on an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum EquipSlot {
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Ears,
    Neck,
    Wrists,
    RightRing,
    LeftRing,
    MainHand,
    OffHand,
}

impl EquipSlot {
    pub const COUNT: usize = 12;

    pub const ALL: [EquipSlot; Self::COUNT] = [
        Self::Head,
        Self::Body,
        Self::Hands,
        Self::Legs,
        Self::Feet,
        Self::Ears,
        Self::Neck,
        Self::Wrists,
        Self::RightRing,
        Self::LeftRing,
        Self::MainHand,
        Self::OffHand,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weapon slots carry visibility semantics the armor slots do not
    #[inline]
    pub fn is_weapon(self) -> bool {
        matches!(self, Self::MainHand | Self::OffHand)
    }
}

impl std::fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Head => write!(f, "Head"),
            Self::Body => write!(f, "Body"),
            Self::Hands => write!(f, "Hands"),
            Self::Legs => write!(f, "Legs"),
            Self::Feet => write!(f, "Feet"),
            Self::Ears => write!(f, "Ears"),
            Self::Neck => write!(f, "Neck"),
            Self::Wrists => write!(f, "Wrists"),
            Self::RightRing => write!(f, "Right Ring"),
            Self::LeftRing => write!(f, "Left Ring"),
            Self::MainHand => write!(f, "Main Hand"),
            Self::OffHand => write!(f, "Off Hand"),
        }
    }
}

/// Dye applied to an equipment piece. 0 means "no stain".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct StainId(pub u8);

impl StainId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// A single equipment slot's content: item, model variant, and dye
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPiece {
    /// Game item id. 0 means "nothing equipped".
    pub item_id: u32,
    /// Model variant of the item
    pub variant: u8,
    /// Dye applied to this piece
    pub stain: StainId,
}

impl EquipmentPiece {
    pub const EMPTY: Self = Self {
        item_id: 0,
        variant: 0,
        stain: StainId::NONE,
    };

    pub fn new(item_id: u32, variant: u8, stain: StainId) -> Self {
        Self {
            item_id,
            variant,
            stain,
        }
    }

    /// True if the two pieces reference the same item model, ignoring dye
    #[inline]
    pub fn same_item(self, other: Self) -> bool {
        self.item_id == other.item_id && self.variant == other.variant
    }
}

/// Enumerated body and face customization attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum CustomizeIndex {
    Race,
    Gender,
    BodyType,
    Face,
    Hairstyle,
    HairColor,
    SkinColor,
    EyeColor,
    TattooColor,
    Height,
    MuscleTone,
    FacePaint,
}

impl CustomizeIndex {
    pub const COUNT: usize = 12;

    pub const ALL: [CustomizeIndex; Self::COUNT] = [
        Self::Race,
        Self::Gender,
        Self::BodyType,
        Self::Face,
        Self::Hairstyle,
        Self::HairColor,
        Self::SkinColor,
        Self::EyeColor,
        Self::TattooColor,
        Self::Height,
        Self::MuscleTone,
        Self::FacePaint,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raw customization value. Interpretation depends on the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CustomizeValue(pub u8);

/// Meta toggle carried by a design alongside equipment and customization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ToggleKind {
    /// Helmet visor lowered
    VisorDown,
    /// Headgear shown at all
    HatVisible,
    /// Weapons shown while not drawn
    WeaponVisible,
    /// Wetness shader forced on
    Wetness,
}

impl ToggleKind {
    pub const COUNT: usize = 4;

    pub const ALL: [ToggleKind; Self::COUNT] = [
        Self::VisorDown,
        Self::HatVisible,
        Self::WeaponVisible,
        Self::Wetness,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ToggleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VisorDown => write!(f, "Visor Down"),
            Self::HatVisible => write!(f, "Hat Visible"),
            Self::WeaponVisible => write!(f, "Weapon Visible"),
            Self::Wetness => write!(f, "Wetness"),
        }
    }
}

/// Value snapshot of a full actor appearance
///
/// Immutable once produced by a resolution pass; the merge copies out of it
/// field by field and never writes back into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DesignData {
    equipment: [EquipmentPiece; EquipSlot::COUNT],
    customize: [CustomizeValue; CustomizeIndex::COUNT],
    toggles: [bool; ToggleKind::COUNT],
}

impl DesignData {
    pub fn piece(&self, slot: EquipSlot) -> EquipmentPiece {
        self.equipment[slot.index()]
    }

    pub fn set_piece(&mut self, slot: EquipSlot, piece: EquipmentPiece) {
        self.equipment[slot.index()] = piece;
    }

    pub fn customize(&self, index: CustomizeIndex) -> CustomizeValue {
        self.customize[index.index()]
    }

    pub fn set_customize(&mut self, index: CustomizeIndex, value: CustomizeValue) {
        self.customize[index.index()] = value;
    }

    pub fn toggle(&self, kind: ToggleKind) -> bool {
        self.toggles[kind.index()]
    }

    pub fn set_toggle(&mut self, kind: ToggleKind, on: bool) {
        self.toggles[kind.index()] = on;
    }
}
