//! Partial assignments of usage counters.

use arrayvec::ArrayVec;

use super::pool::{Category, Pool, PoolSet, UsageKey};
use super::usage::Usage;

/// A partial map of counter → new absolute value.
///
/// Holds at most one entry per counter, so nine entries at most. Setting a
/// key twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageDelta {
    entries: ArrayVec<(UsageKey, u32), 9>,
}

impl UsageDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `key`, replacing an earlier assignment of the same key.
    pub fn set(&mut self, key: UsageKey, value: u32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            // At most nine distinct keys exist, so the push cannot overflow.
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, pool: Pool, category: Category, value: u32) -> Self {
        self.set(UsageKey::new(pool, category), value);
        self
    }

    pub fn get(&self, key: UsageKey) -> Option<u32> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UsageKey, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pools with at least one assigned counter.
    pub fn pools(&self) -> PoolSet {
        self.entries
            .iter()
            .fold(PoolSet::empty(), |set, (key, _)| set | key.pool.flag())
    }

    /// The usage that results from applying this delta to `usage`.
    pub fn applied_to(&self, usage: &Usage) -> Usage {
        let mut next = *usage;
        for (key, value) in self.iter() {
            next.set(key, value);
        }
        next
    }

    /// Current values of every counter of the given pools.
    pub fn capture(usage: &Usage, pools: PoolSet) -> Self {
        let mut delta = Self::new();
        for pool in pools.pools() {
            for category in Category::ALL {
                let key = UsageKey::new(pool, category);
                delta.set(key, usage.get(key));
            }
        }
        delta
    }

    /// Drop assignments that would not change `usage`.
    #[must_use]
    pub fn changes_from(&self, usage: &Usage) -> Self {
        let mut delta = Self::new();
        for (key, value) in self.iter().filter(|(key, value)| usage.get(*key) != *value) {
            delta.set(key, value);
        }
        delta
    }
}

impl FromIterator<(UsageKey, u32)> for UsageDelta {
    fn from_iter<I: IntoIterator<Item = (UsageKey, u32)>>(iter: I) -> Self {
        let mut delta = Self::new();
        for (key, value) in iter {
            delta.set(key, value);
        }
        delta
    }
}
