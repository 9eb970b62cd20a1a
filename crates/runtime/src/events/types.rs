//! Event types for different topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a queued usage save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    /// Snapshot written by the repository
    Saved { name: String, at: DateTime<Utc> },

    /// Snapshot could not be written; in-memory state is unaffected
    Failed {
        name: String,
        error: String,
        at: DateTime<Utc>,
    },
}

impl PersistenceEvent {
    pub fn name(&self) -> &str {
        match self {
            Self::Saved { name, .. } | Self::Failed { name, .. } => name,
        }
    }
}
