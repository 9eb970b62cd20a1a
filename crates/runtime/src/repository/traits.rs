//! Repository contract for saving and loading usage snapshots.

use tracker_core::SavedUsage;

use super::Result;

/// Storage collaborator for usage snapshots, keyed by character name.
///
/// Implementations must tolerate concurrent calls from the persistence worker
/// and the session owner.
pub trait UsageRepository: Send + Sync {
    /// Save (replace) the snapshot of a character.
    fn save(&self, name: &str, record: &SavedUsage) -> Result<()>;

    /// Load the snapshot of a character, `None` if never saved.
    fn load(&self, name: &str) -> Result<Option<SavedUsage>>;

    /// Check if a snapshot exists
    fn exists(&self, name: &str) -> bool;

    /// Delete a snapshot
    fn delete(&self, name: &str) -> Result<()>;

    /// List the names of all saved characters, sorted.
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
