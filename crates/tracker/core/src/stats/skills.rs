//! Skills and the fixed attribute pairing table.
//!
//! Every skill value is `rank + attribute₁ + attribute₂ − wounded_deduction`.
//! Stealth additionally adds the stealth modifier `5 − size_class`.

use std::collections::BTreeMap;

use super::attributes::{Attribute, Attributes};

/// Whether a skill is a general skill or a magic school.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    General,
    Magic,
}

/// Identifier of one of the 46 skills.
///
/// The string form is the identifier used by character sheets
/// (`"arcanelore"`, `"locksntraps"`, `"firemagic"`).
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Skill {
    // General skills
    Acrobatics,
    Alchemy,
    Leadership,
    ArcaneLore,
    Athletics,
    Performance,
    Diplomacy,
    Clscraft,
    Empathy,
    Determination,
    Dexterity,
    History,
    Craftmanship,
    Heal,
    Stealth,
    Hunting,
    CountryLore,
    Nature,
    Eloquence,
    LocksNTraps,
    Swim,
    Seafaring,
    StreetLore,
    Animals,
    Survival,
    Perception,
    Endurance,

    // Magic schools
    AntiMagic,
    ControlMagic,
    MotionMagic,
    InsightMagic,
    StoneMagic,
    FireMagic,
    HealMagic,
    IllusionMagic,
    CombatMagic,
    LightMagic,
    NatureMagic,
    ShadowMagic,
    FateMagic,
    ProtectionMagic,
    EnhanceMagic,
    DeathMagic,
    TransformationMagic,
    WaterMagic,
    WindMagic,
}

/// The attributes a skill is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillFormula {
    pub first: Attribute,
    pub second: Attribute,
    /// Adds the stealth modifier (`5 − size_class`).
    pub size_term: bool,
}

impl SkillFormula {
    const fn pair(first: Attribute, second: Attribute) -> Self {
        Self {
            first,
            second,
            size_term: false,
        }
    }

    /// Attribute contribution of this formula, before rank and wounds.
    pub const fn base(&self, attributes: &Attributes, stealth_modifier: i32) -> i32 {
        let size = if self.size_term { stealth_modifier } else { 0 };
        attributes.get(self.first) + attributes.get(self.second) + size
    }
}

impl Skill {
    pub const fn kind(&self) -> SkillKind {
        use Skill::*;
        match self {
            AntiMagic | ControlMagic | MotionMagic | InsightMagic | StoneMagic | FireMagic
            | HealMagic | IllusionMagic | CombatMagic | LightMagic | NatureMagic | ShadowMagic
            | FateMagic | ProtectionMagic | EnhanceMagic | DeathMagic | TransformationMagic
            | WaterMagic | WindMagic => SkillKind::Magic,
            _ => SkillKind::General,
        }
    }

    /// Attribute pairing for this skill.
    pub const fn formula(&self) -> SkillFormula {
        use Attribute::*;
        use Skill::*;
        match self {
            Acrobatics => SkillFormula::pair(Agility, Strength),
            Alchemy => SkillFormula::pair(Mystic, Mind),
            Leadership => SkillFormula::pair(Charisma, Willpower),
            ArcaneLore => SkillFormula::pair(Mystic, Mind),
            Athletics => SkillFormula::pair(Agility, Strength),
            Performance => SkillFormula::pair(Charisma, Willpower),
            Diplomacy => SkillFormula::pair(Charisma, Mind),
            Clscraft => SkillFormula::pair(Intuition, Mind),
            Empathy => SkillFormula::pair(Intuition, Mind),
            Determination => SkillFormula::pair(Charisma, Willpower),
            Dexterity => SkillFormula::pair(Charisma, Agility),
            History => SkillFormula::pair(Mystic, Mind),
            Craftmanship => SkillFormula::pair(Constitution, Mind),
            Heal => SkillFormula::pair(Intuition, Mind),
            Stealth => SkillFormula {
                first: Agility,
                second: Intuition,
                size_term: true,
            },
            Hunting => SkillFormula::pair(Constitution, Mind),
            CountryLore => SkillFormula::pair(Intuition, Mind),
            Nature => SkillFormula::pair(Intuition, Mind),
            Eloquence => SkillFormula::pair(Charisma, Willpower),
            LocksNTraps => SkillFormula::pair(Intuition, Agility),
            Swim => SkillFormula::pair(Constitution, Strength),
            Seafaring => SkillFormula::pair(Agility, Constitution),
            StreetLore => SkillFormula::pair(Charisma, Intuition),
            Animals => SkillFormula::pair(Charisma, Agility),
            Survival => SkillFormula::pair(Intuition, Constitution),
            Perception => SkillFormula::pair(Intuition, Willpower),
            Endurance => SkillFormula::pair(Constitution, Willpower),

            AntiMagic => SkillFormula::pair(Mystic, Willpower),
            ControlMagic => SkillFormula::pair(Mystic, Willpower),
            MotionMagic => SkillFormula::pair(Mystic, Agility),
            InsightMagic => SkillFormula::pair(Mystic, Mind),
            StoneMagic => SkillFormula::pair(Mystic, Constitution),
            FireMagic => SkillFormula::pair(Mystic, Charisma),
            HealMagic => SkillFormula::pair(Mystic, Charisma),
            IllusionMagic => SkillFormula::pair(Mystic, Charisma),
            CombatMagic => SkillFormula::pair(Mystic, Strength),
            LightMagic => SkillFormula::pair(Mystic, Charisma),
            NatureMagic => SkillFormula::pair(Mystic, Charisma),
            ShadowMagic => SkillFormula::pair(Mystic, Intuition),
            FateMagic => SkillFormula::pair(Mystic, Charisma),
            ProtectionMagic => SkillFormula::pair(Mystic, Charisma),
            EnhanceMagic => SkillFormula::pair(Mystic, Strength),
            DeathMagic => SkillFormula::pair(Mystic, Mind),
            TransformationMagic => SkillFormula::pair(Mystic, Constitution),
            WaterMagic => SkillFormula::pair(Mystic, Intuition),
            WindMagic => SkillFormula::pair(Mystic, Mind),
        }
    }
}

/// Invested skill ranks, stored separately from the derived totals.
///
/// Skills without an entry have rank 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillRanks {
    ranks: BTreeMap<Skill, i32>,
}

impl SkillRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rank(&self, skill: Skill) -> i32 {
        self.ranks.get(&skill).copied().unwrap_or(0)
    }

    pub fn set(&mut self, skill: Skill, rank: i32) {
        self.ranks.insert(skill, rank);
    }

    /// Skills with an explicit rank, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        self.ranks.iter().map(|(skill, rank)| (*skill, *rank))
    }
}

impl FromIterator<(Skill, i32)> for SkillRanks {
    fn from_iter<I: IntoIterator<Item = (Skill, i32)>>(iter: I) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}
