//! The immutable inputs of the derivation model.

use super::attributes::Attributes;
use super::level::Experience;
use super::powers::PowerBonuses;
use super::race::Race;
use super::skills::SkillRanks;

/// Everything the derivation model needs besides current LP usage.
///
/// Built once when a character is loaded; never mutated during a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub attributes: Attributes,
    /// `None` when the sheet names a race this model does not know.
    pub race: Option<Race>,
    pub experience: Experience,
    pub skills: SkillRanks,
    pub powers: PowerBonuses,
}

impl Profile {
    pub fn size_class(&self) -> i32 {
        Race::size_class_of(self.race)
    }

    pub const fn level(&self) -> i32 {
        self.experience.level()
    }

    /// Base life points (one wound level worth of LP).
    pub fn lp(&self) -> i32 {
        self.size_class() + self.attributes.constitution + self.powers.additional_lp
    }

    pub fn max_lp(&self) -> i32 {
        self.lp() * 5
    }

    pub const fn max_focus(&self) -> i32 {
        2 * (self.attributes.mystic + self.attributes.willpower) + self.powers.additional_focus
    }

    pub const fn max_splinters(&self) -> i32 {
        3 + self.powers.additional_splinters + self.level() - 1
    }

    pub const fn lp_regeneration(&self) -> i32 {
        regeneration(
            self.attributes.constitution,
            self.powers.additional_lp_regeneration,
        )
    }

    pub const fn focus_regeneration(&self) -> i32 {
        regeneration(
            self.attributes.willpower,
            self.powers.additional_focus_regeneration,
        )
    }

    pub fn stealth_modifier(&self) -> i32 {
        5 - self.size_class()
    }
}

/// `max(1, attribute × (2 + bonus))`
const fn regeneration(attribute: i32, bonus: i32) -> i32 {
    let rate = attribute * (2 + bonus);
    if rate < 1 { 1 } else { rate }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regeneration_never_below_one() {
        let profile = Profile::default();
        assert_eq!(profile.lp_regeneration(), 1);
        assert_eq!(profile.focus_regeneration(), 1);
    }

    #[test]
    fn regeneration_scales_with_powers() {
        let mut profile = Profile::default();
        profile.attributes.constitution = 3;
        profile.attributes.willpower = 2;
        profile.powers.additional_lp_regeneration = 1;
        assert_eq!(profile.lp_regeneration(), 9);
        assert_eq!(profile.focus_regeneration(), 4);
    }

    #[test]
    fn splinters_grow_with_level() {
        let mut profile = Profile::default();
        assert_eq!(profile.max_splinters(), 3);
        profile.experience.spent = 600;
        profile.powers.additional_splinters = 2;
        assert_eq!(profile.max_splinters(), 8);
    }
}
