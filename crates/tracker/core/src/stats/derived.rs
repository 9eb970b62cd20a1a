//! Derived values - Layer 2 of the stat system.
//!
//! Pools, resistances, movement and skill totals derived from a [`Profile`]
//! and the currently consumed LP. These are NOT stored - always recomputed
//! when read.
//!
//! Formulas:
//! - speed = size_class + AGI − wounded_deduction
//! - initiative = 10 − INT + wounded_deduction
//! - defense = 12 + AGI + STR + 2×(5 − size_class) + 2×(level − 1)
//! - mental_resistance = 12 + MND + WIL + 2×(level − 1)
//! - physical_resistance = 12 + CON + WIL + 2×(level − 1)
//! - wounded_level = ⌊consumed_lp / lp⌋
//! - wounded_deduction = 2^(wounded_level − 1), 0 when unwounded

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::profile::Profile;
use super::skills::Skill;

/// Highest wound level the deduction formula is evaluated for.
///
/// A valid ledger caps consumed LP at `5 × lp`; the clamp only keeps the
/// shift in range for inconsistent snapshots.
const MAX_WOUND_SHIFT: i32 = 30;

/// Number of complete LP blocks lost to consumed damage.
///
/// Zero when the base LP is not positive.
pub fn wounded_level(consumed_lp: u32, lp: i32) -> i32 {
    if lp <= 0 {
        return 0;
    }
    i32::try_from(consumed_lp / lp as u32).unwrap_or(i32::MAX)
}

/// Penalty for a wound level: 0, 1, 2, 4, 8, …
pub fn wounded_deduction(wounded_level: i32) -> i32 {
    if wounded_level <= 0 {
        0
    } else {
        1 << (wounded_level - 1).min(MAX_WOUND_SHIFT)
    }
}

/// Snapshot of every derived value for one profile and LP usage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub size_class: i32,
    pub level: i32,

    pub speed: i32,
    pub initiative: i32,

    pub lp: i32,
    pub max_lp: i32,
    pub max_focus: i32,
    pub max_splinters: i32,

    pub defense: i32,
    pub mental_resistance: i32,
    pub physical_resistance: i32,

    pub lp_regeneration: i32,
    pub focus_regeneration: i32,

    pub wounded_level: i32,
    pub wounded_deduction: i32,
    pub stealth_modifier: i32,

    skills: BTreeMap<Skill, i32>,
}

impl DerivedStats {
    pub fn compute(profile: &Profile, consumed_lp: u32) -> Self {
        let attrs = &profile.attributes;
        let size_class = profile.size_class();
        let level = profile.level();
        let lp = profile.lp();
        let stealth_modifier = profile.stealth_modifier();

        let wounded_level = wounded_level(consumed_lp, lp);
        let deduction = wounded_deduction(wounded_level);
        let level_bonus = 2 * (level - 1);

        let skills = Skill::iter()
            .map(|skill| {
                let base = skill.formula().base(attrs, stealth_modifier);
                (skill, profile.skills.rank(skill) + base - deduction)
            })
            .collect();

        Self {
            size_class,
            level,
            speed: size_class + attrs.agility - deduction,
            initiative: 10 - attrs.intuition + deduction,
            lp,
            max_lp: profile.max_lp(),
            max_focus: profile.max_focus(),
            max_splinters: profile.max_splinters(),
            defense: 12 + attrs.agility + attrs.strength + 2 * (5 - size_class) + level_bonus,
            mental_resistance: 12 + attrs.mind + attrs.willpower + level_bonus,
            physical_resistance: 12 + attrs.constitution + attrs.willpower + level_bonus,
            lp_regeneration: profile.lp_regeneration(),
            focus_regeneration: profile.focus_regeneration(),
            wounded_level,
            wounded_deduction: deduction,
            stealth_modifier,
            skills,
        }
    }

    /// Total value of a skill, wounds included.
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn skills(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        self.skills.iter().map(|(skill, value)| (*skill, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Attributes, Experience, Race};

    fn human(constitution: i32) -> Profile {
        Profile {
            attributes: Attributes {
                constitution,
                ..Attributes::default()
            },
            race: Some(Race::Human),
            ..Profile::default()
        }
    }

    #[test]
    fn lp_and_max_lp() {
        let stats = DerivedStats::compute(&human(3), 0);
        assert_eq!(stats.lp, 8);
        assert_eq!(stats.max_lp, 40);
        assert_eq!(stats.wounded_level, 0);
        assert_eq!(stats.wounded_deduction, 0);
    }

    #[test]
    fn wounds_from_consumed_lp() {
        let stats = DerivedStats::compute(&human(3), 16);
        assert_eq!(stats.wounded_level, 2);
        assert_eq!(stats.wounded_deduction, 2);
    }

    #[test]
    fn deduction_sequence() {
        let deductions: Vec<_> = (0..=5).map(wounded_deduction).collect();
        assert_eq!(deductions, [0, 1, 2, 4, 8, 16]);
        assert_eq!(wounded_deduction(-3), 0);
    }

    #[test]
    fn non_positive_lp_is_never_wounded() {
        assert_eq!(wounded_level(12, 0), 0);
        assert_eq!(wounded_level(12, -4), 0);
    }

    #[test]
    fn wounds_affect_speed_initiative_and_skills() {
        let mut profile = human(3);
        profile.attributes.agility = 3;
        profile.attributes.intuition = 2;
        profile.attributes.strength = 1;

        let healthy = DerivedStats::compute(&profile, 0);
        let wounded = DerivedStats::compute(&profile, 8);
        assert_eq!(wounded.wounded_deduction, 1);

        assert_eq!(healthy.speed, 8);
        assert_eq!(wounded.speed, 7);
        assert_eq!(healthy.initiative, 8);
        assert_eq!(wounded.initiative, 9);
        assert_eq!(healthy.skill(Skill::Acrobatics), 4);
        assert_eq!(wounded.skill(Skill::Acrobatics), 3);
        // Defense ignores wounds.
        assert_eq!(healthy.defense, wounded.defense);
    }

    #[test]
    fn stealth_uses_size_class() {
        let mut profile = human(0);
        profile.race = Some(Race::Gnome);
        profile.attributes.agility = 2;
        profile.attributes.intuition = 1;
        profile.skills.set(Skill::Stealth, 4);

        let stats = DerivedStats::compute(&profile, 0);
        assert_eq!(stats.stealth_modifier, 2);
        assert_eq!(stats.skill(Skill::Stealth), 4 + 2 + 1 + 2);
    }

    #[test]
    fn level_raises_defense_and_resistances() {
        let mut profile = human(2);
        profile.attributes.agility = 2;
        profile.attributes.strength = 3;
        profile.attributes.mind = 1;
        profile.attributes.willpower = 2;
        profile.experience = Experience::new(300, 0);

        let stats = DerivedStats::compute(&profile, 0);
        assert_eq!(stats.level, 3);
        assert_eq!(stats.defense, 12 + 2 + 3 + 0 + 4);
        assert_eq!(stats.mental_resistance, 12 + 1 + 2 + 4);
        assert_eq!(stats.physical_resistance, 12 + 2 + 2 + 4);
    }

    #[test]
    fn unknown_race_uses_default_size() {
        let mut profile = human(1);
        profile.race = None;
        profile.attributes.agility = 1;
        let stats = DerivedStats::compute(&profile, 0);
        assert_eq!(stats.size_class, 5);
        assert_eq!(stats.speed, 6);
    }
}
