//! Base attributes - Layer 1 of the stat system.
//!
//! The eight attributes are the Single Source of Truth for every derived value.
//! They are set once when a character is loaded and never mutated afterwards.
//! No floor is enforced: the formulas accept whatever the sheet says.

/// Identifier of one of the eight base attributes.
///
/// Parsing is case-insensitive so identifiers from character sheets
/// (`"CONSTITUTION"`, `"Mind"`) resolve directly.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Attribute {
    Charisma,
    Agility,
    Intuition,
    Constitution,
    Mystic,
    Strength,
    Mind,
    Willpower,
}

impl Attribute {
    /// Short sheet label, as printed on the character sheet.
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::Charisma => "CHA",
            Self::Agility => "AGI",
            Self::Intuition => "INT",
            Self::Constitution => "CON",
            Self::Mystic => "MYS",
            Self::Strength => "STR",
            Self::Mind => "MND",
            Self::Willpower => "WIL",
        }
    }
}

/// The eight base attribute values of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub charisma: i32,
    pub agility: i32,
    pub intuition: i32,
    pub constitution: i32,
    pub mystic: i32,
    pub strength: i32,
    pub mind: i32,
    pub willpower: i32,
}

impl Attributes {
    /// Get the value of a single attribute.
    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Charisma => self.charisma,
            Attribute::Agility => self.agility,
            Attribute::Intuition => self.intuition,
            Attribute::Constitution => self.constitution,
            Attribute::Mystic => self.mystic,
            Attribute::Strength => self.strength,
            Attribute::Mind => self.mind,
            Attribute::Willpower => self.willpower,
        }
    }

    /// Set a single attribute (builder pattern, used while assembling a sheet).
    #[must_use]
    pub const fn with(mut self, attribute: Attribute, value: i32) -> Self {
        match attribute {
            Attribute::Charisma => self.charisma = value,
            Attribute::Agility => self.agility = value,
            Attribute::Intuition => self.intuition = value,
            Attribute::Constitution => self.constitution = value,
            Attribute::Mystic => self.mystic = value,
            Attribute::Strength => self.strength = value,
            Attribute::Mind => self.mind = value,
            Attribute::Willpower => self.willpower = value,
        }
        self
    }
}
