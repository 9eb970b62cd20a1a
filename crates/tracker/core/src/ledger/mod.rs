//! Resource ledger: the nine usage counters and the only place they change.
//!
//! Every mutation is an absolute assignment of some counters ([`UsageDelta`]),
//! validated against the pool maximums as a whole and committed atomically.

mod delta;
mod pool;
mod usage;

pub use delta::UsageDelta;
pub use pool::{Category, Pool, PoolMaximums, PoolSet, UsageKey};
pub use usage::{Usage, UsageFields};

use crate::action::ActionKind;
use crate::error::{ErrorSeverity, TrackerError};

/// Errors raised by [`Ledger::apply`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The delta would leave a pool with negative free capacity.
    #[error("not enough {} available ({} missing)", .pool.label(), .missing)]
    InsufficientCapacity { pool: Pool, missing: u64 },
}

impl TrackerError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientCapacity { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientCapacity { .. } => "INSUFFICIENT_CAPACITY",
        }
    }
}

/// Before/after fragments of one committed ledger update.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerChange {
    /// Every counter of the touched pools, as they were before the update.
    pub before: UsageDelta,
    /// The counters that changed, with their new values.
    pub after: UsageDelta,
}

/// Owner of the usage counters of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    usage: Usage,
}

impl Ledger {
    pub fn new(usage: Usage) -> Self {
        Self { usage }
    }

    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Apply `delta` as one transaction.
    ///
    /// For every pool the delta touches, the resulting free capacity is
    /// checked; if any pool would end up over capacity with more usage than it
    /// had before, nothing changes and [`LedgerError::InsufficientCapacity`]
    /// is returned. [`ActionKind::Replay`] skips the check.
    ///
    /// A negative resulting free value alone is not a rejection: a pool that
    /// was already over capacity (a sheet lowered its maximum since the last
    /// save) may still shrink or stay level, so rests, restores and
    /// conversions always go through. See DESIGN.md, decision 5.
    pub fn apply(
        &mut self,
        delta: &UsageDelta,
        maximums: &PoolMaximums,
        kind: ActionKind,
    ) -> Result<LedgerChange, LedgerError> {
        if kind.is_replay() {
            return Ok(self.replay(delta));
        }

        let next = delta.applied_to(&self.usage);
        for pool in delta.pools().pools() {
            let free = next.free(pool, maximums);
            if free < 0 && next.used(pool) > self.usage.used(pool) {
                return Err(LedgerError::InsufficientCapacity {
                    pool,
                    missing: free.unsigned_abs(),
                });
            }
        }

        Ok(self.commit(delta, next))
    }

    /// Apply `delta` without capacity validation.
    pub fn replay(&mut self, delta: &UsageDelta) -> LedgerChange {
        let next = delta.applied_to(&self.usage);
        self.commit(delta, next)
    }

    fn commit(&mut self, delta: &UsageDelta, next: Usage) -> LedgerChange {
        let change = LedgerChange {
            before: UsageDelta::capture(&self.usage, delta.pools()),
            after: delta.changes_from(&self.usage),
        };
        self.usage = next;
        change
    }
}
