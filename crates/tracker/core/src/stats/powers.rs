//! Granted powers that raise pool sizes and regeneration.
//!
//! Only five power references influence the derivation model; every other
//! reference on a character sheet is ignored.

/// A power reference recognized by the derivation model.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum PowerRef {
    /// Additional splinter points: 2 per count.
    AddSplinter,
    /// Larger focus pool: 5 per count.
    FocusPool,
    /// Sturdy: 1 additional LP per count.
    Sturdy,
    /// Faster focus regeneration multiplier.
    FocusRegen,
    /// Faster life regeneration multiplier.
    LifeRegen,
}

/// Pool and regeneration additions granted by powers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerBonuses {
    pub additional_splinters: i32,
    pub additional_focus: i32,
    pub additional_lp: i32,
    pub additional_lp_regeneration: i32,
    pub additional_focus_regeneration: i32,
}

impl PowerBonuses {
    /// Collect bonuses from `(reference, count)` grants.
    ///
    /// Unknown references are skipped. A reference granted twice keeps the
    /// last count, matching how sheets list each power once with its count.
    pub fn from_grants<'a, I>(grants: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        grants
            .into_iter()
            .filter_map(|(reference, count)| Some((reference.parse::<PowerRef>().ok()?, count)))
            .fold(Self::default(), |bonuses, (power, count)| {
                bonuses.with_grant(power, count)
            })
    }

    #[must_use]
    pub const fn with_grant(mut self, power: PowerRef, count: i32) -> Self {
        match power {
            PowerRef::AddSplinter => self.additional_splinters = 2 * count,
            PowerRef::FocusPool => self.additional_focus = 5 * count,
            PowerRef::Sturdy => self.additional_lp = count,
            PowerRef::FocusRegen => self.additional_focus_regeneration = count,
            PowerRef::LifeRegen => self.additional_lp_regeneration = count,
        }
        self
    }
}
