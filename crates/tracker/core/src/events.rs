//! Change notifications emitted by the character aggregate.

use chrono::{DateTime, Utc};

use crate::action::ActionKind;
use crate::ledger::UsageDelta;

/// A committed, non-replay ledger update.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeEvent {
    /// Character name.
    pub character: String,
    pub before: UsageDelta,
    pub after: UsageDelta,
    pub action: ActionKind,
    pub annotation: Option<String>,
    pub at: DateTime<Utc>,
}

/// Subscriber to change events.
///
/// Observers run synchronously, in subscription order, before the update
/// returns to its caller.
pub trait ChangeObserver: Send + Sync {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeObserver for F
where
    F: Fn(&ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}
