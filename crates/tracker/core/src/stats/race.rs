//! Races and their size class.

/// Playable race.
///
/// The race only matters through its size class, which feeds speed, defense,
/// stealth and the stealth modifier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Race {
    Gnome,
    Dwarf,
    Alben,
    #[default]
    Human,
    Varg,
}

impl Race {
    /// Size class used when the race code is unknown.
    pub const DEFAULT_SIZE_CLASS: i32 = 5;

    /// Resolve a race code from a character sheet.
    ///
    /// Unknown or empty codes yield `None`; callers fall back to
    /// [`Race::DEFAULT_SIZE_CLASS`] through [`Race::size_class_of`].
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    pub const fn size_class(&self) -> i32 {
        match self {
            Self::Gnome => 3,
            Self::Dwarf => 4,
            Self::Alben | Self::Human => 5,
            Self::Varg => 6,
        }
    }

    /// Size class of an optional race, defaulting for unknown races.
    pub fn size_class_of(race: Option<Race>) -> i32 {
        race.map_or(Self::DEFAULT_SIZE_CLASS, |race| race.size_class())
    }

    /// Display label for presentation layers.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gnome => "Gnome",
            Self::Dwarf => "Dwarf",
            Self::Alben => "Alb",
            Self::Human => "Human",
            Self::Varg => "Varg",
        }
    }
}
