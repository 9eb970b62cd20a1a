//! The nine usage counters.

use super::pool::{Category, Pool, PoolMaximums, UsageKey};

/// Usage counters for every pool and category.
///
/// Counters are addressed by `(pool, category)` and can never go negative.
/// Whether they fit the pool maximums is the ledger's concern, not this type's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "UsageFields", into = "UsageFields"))]
pub struct Usage {
    counters: [[u32; 3]; 3],
}

impl Usage {
    /// All counters zero.
    pub const fn new() -> Self {
        Self {
            counters: [[0; 3]; 3],
        }
    }

    pub const fn get(&self, key: UsageKey) -> u32 {
        self.counters[key.pool.index()][key.category.index()]
    }

    pub const fn of(&self, pool: Pool, category: Category) -> u32 {
        self.get(UsageKey::new(pool, category))
    }

    pub(crate) fn set(&mut self, key: UsageKey, value: u32) {
        self.counters[key.pool.index()][key.category.index()] = value;
    }

    /// Builder used by tests and loaders.
    #[must_use]
    pub fn with(mut self, pool: Pool, category: Category, value: u32) -> Self {
        self.set(UsageKey::new(pool, category), value);
        self
    }

    /// Sum of the three categories of a pool.
    pub fn used(&self, pool: Pool) -> u64 {
        self.counters[pool.index()].iter().map(|&v| u64::from(v)).sum()
    }

    /// `max − used`; negative when the pool is over capacity.
    pub fn free(&self, pool: Pool, maximums: &PoolMaximums) -> i64 {
        i64::from(maximums.get(pool)) - self.used(pool) as i64
    }

    pub fn is_zero(&self) -> bool {
        self.counters.iter().flatten().all(|&v| v == 0)
    }
}

/// Flat, named serialization layout of [`Usage`].
///
/// Missing fields default to zero so older snapshots keep loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UsageFields {
    pub consumed_lp: u32,
    pub exhausted_lp: u32,
    pub channeled_lp: u32,
    pub consumed_focus: u32,
    pub exhausted_focus: u32,
    pub channeled_focus: u32,
    pub consumed_splinters: u32,
    pub exhausted_splinters: u32,
    pub channeled_splinters: u32,
}

impl From<UsageFields> for Usage {
    fn from(f: UsageFields) -> Self {
        Self {
            counters: [
                [f.consumed_lp, f.exhausted_lp, f.channeled_lp],
                [f.consumed_focus, f.exhausted_focus, f.channeled_focus],
                [
                    f.consumed_splinters,
                    f.exhausted_splinters,
                    f.channeled_splinters,
                ],
            ],
        }
    }
}

impl From<Usage> for UsageFields {
    fn from(usage: Usage) -> Self {
        let [lp, focus, splinters] = usage.counters;
        Self {
            consumed_lp: lp[0],
            exhausted_lp: lp[1],
            channeled_lp: lp[2],
            consumed_focus: focus[0],
            exhausted_focus: focus[1],
            channeled_focus: focus[2],
            consumed_splinters: splinters[0],
            exhausted_splinters: splinters[1],
            channeled_splinters: splinters[2],
        }
    }
}
