//! Loader input and the persisted usage snapshot.

use crate::ledger::Usage;
use crate::stats::{Attribute, Attributes, Experience, PowerBonuses, Profile, Race, Skill, SkillRanks};

/// A `(reference, count)` power entry from a character sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerGrant {
    pub reference: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeFact {
    pub id: String,
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillFact {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: i32,
}

/// Parsed facts of one character sheet.
///
/// Ids are kept as strings: unknown attributes, skills and powers are
/// ignored when the profile is built, and an unknown race code falls back to
/// the default size class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterFacts {
    pub name: String,
    pub race: String,
    pub spent_experience: i32,
    pub free_experience: i32,
    pub powers: Vec<PowerGrant>,
    pub attributes: Vec<AttributeFact>,
    pub skills: Vec<SkillFact>,
}

impl CharacterFacts {
    pub fn profile(&self) -> Profile {
        let attributes = self
            .attributes
            .iter()
            .filter_map(|fact| Some((fact.id.trim().parse::<Attribute>().ok()?, fact.value)))
            .fold(Attributes::default(), |attrs, (attribute, value)| {
                attrs.with(attribute, value)
            });

        let skills: SkillRanks = self
            .skills
            .iter()
            .filter_map(|fact| Some((fact.id.trim().parse::<Skill>().ok()?, fact.rank)))
            .collect();

        let powers = PowerBonuses::from_grants(
            self.powers
                .iter()
                .map(|grant| (grant.reference.as_str(), grant.count)),
        );

        Profile {
            attributes,
            race: Race::from_code(&self.race),
            experience: Experience::new(self.spent_experience, self.free_experience),
            skills,
            powers,
        }
    }
}

/// What the storage collaborator keeps per character: the nine counters and
/// the free-text note.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedUsage {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub usage: Usage,
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PowerRef;

    fn facts() -> CharacterFacts {
        CharacterFacts {
            name: "Tarik".to_owned(),
            race: "varg".to_owned(),
            spent_experience: 320,
            free_experience: 15,
            powers: vec![
                PowerGrant {
                    reference: PowerRef::FocusPool.to_string(),
                    count: 2,
                },
                PowerGrant {
                    reference: "unknownpower".to_owned(),
                    count: 9,
                },
            ],
            attributes: vec![
                AttributeFact {
                    id: "CONSTITUTION".to_owned(),
                    value: 3,
                },
                AttributeFact {
                    id: "luck".to_owned(),
                    value: 7,
                },
            ],
            skills: vec![
                SkillFact {
                    id: "athletics".to_owned(),
                    rank: 6,
                },
                SkillFact {
                    id: "basketweaving".to_owned(),
                    rank: 4,
                },
            ],
        }
    }

    #[test]
    fn profile_ignores_unknown_ids() {
        let profile = facts().profile();
        assert_eq!(profile.race, Some(Race::Varg));
        assert_eq!(profile.attributes.constitution, 3);
        assert_eq!(profile.powers.additional_focus, 10);
        assert_eq!(profile.skills.rank(Skill::Athletics), 6);
        assert_eq!(profile.skills.iter().count(), 1);
        assert_eq!(profile.experience.total(), 335);
        assert_eq!(profile.level(), 3);
    }

    #[test]
    fn unknown_race_uses_default_size() {
        let facts = CharacterFacts {
            race: "dragon".to_owned(),
            ..facts()
        };
        let profile = facts.profile();
        assert_eq!(profile.race, None);
        assert_eq!(profile.size_class(), Race::DEFAULT_SIZE_CLASS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn saved_usage_uses_flat_layout() {
        let json = r#"{"consumed_lp": 4, "channeled_focus": 2, "note": "poisoned"}"#;
        let saved: SavedUsage = serde_json::from_str(json).unwrap();
        assert_eq!(
            saved.usage.of(crate::ledger::Pool::Lp, crate::ledger::Category::Consumed),
            4
        );
        assert_eq!(saved.note, "poisoned");

        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(value["channeled_focus"], 2);
        assert_eq!(value["exhausted_splinters"], 0);
    }
}
