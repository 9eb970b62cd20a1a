//! Pools, usage categories and the keys addressing the nine counters.

use bitflags::bitflags;

/// One of the three trackable resources.
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
pub enum Pool {
    /// Life points.
    Lp,
    Focus,
    Splinters,
}

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Lp, Pool::Focus, Pool::Splinters];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Lp => "life points",
            Self::Focus => "focus",
            Self::Splinters => "splinter points",
        }
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Lp => 0,
            Self::Focus => 1,
            Self::Splinters => 2,
        }
    }

    pub const fn flag(&self) -> PoolSet {
        match self {
            Self::Lp => PoolSet::LP,
            Self::Focus => PoolSet::FOCUS,
            Self::Splinters => PoolSet::SPLINTERS,
        }
    }
}

/// How a used point of a pool is allocated.
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
pub enum Category {
    /// Permanently used until regenerated by a long rest.
    Consumed,
    /// Temporarily used; recovered by any rest.
    Exhausted,
    /// Committed to an ongoing effect.
    Channeled,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Consumed, Category::Exhausted, Category::Channeled];

    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Consumed => 0,
            Self::Exhausted => 1,
            Self::Channeled => 2,
        }
    }
}

/// Address of one of the nine usage counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageKey {
    pub pool: Pool,
    pub category: Category,
}

impl UsageKey {
    pub const fn new(pool: Pool, category: Category) -> Self {
        Self { pool, category }
    }

    /// All nine keys, pool-major.
    pub fn all() -> impl Iterator<Item = UsageKey> {
        Pool::ALL.into_iter().flat_map(|pool| {
            Category::ALL
                .into_iter()
                .map(move |category| UsageKey::new(pool, category))
        })
    }
}

impl core::fmt::Display for UsageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}_{}", self.category, self.pool)
    }
}

bitflags! {
    /// Set of pools, used to track which pools a delta touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PoolSet: u8 {
        const LP        = 1 << 0;
        const FOCUS     = 1 << 1;
        const SPLINTERS = 1 << 2;
    }
}

impl PoolSet {
    pub fn pools(self) -> impl Iterator<Item = Pool> {
        Pool::ALL
            .into_iter()
            .filter(move |pool| self.contains(pool.flag()))
    }
}

/// Capacity of each pool, taken from the derivation model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolMaximums {
    pub lp: i32,
    pub focus: i32,
    pub splinters: i32,
}

impl PoolMaximums {
    pub const fn get(&self, pool: Pool) -> i32 {
        match pool {
            Pool::Lp => self.lp,
            Pool::Focus => self.focus,
            Pool::Splinters => self.splinters,
        }
    }
}
