//! In-memory UsageRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use tracker_core::SavedUsage;

use crate::repository::{RepositoryError, Result, UsageRepository};

/// In-memory implementation of UsageRepository.
///
/// Snapshots live only as long as the repository; used when persistence is
/// disabled and in tests.
pub struct InMemoryUsageRepo {
    records: RwLock<HashMap<String, SavedUsage>>,
}

impl InMemoryUsageRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUsageRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageRepository for InMemoryUsageRepo {
    fn save(&self, name: &str, record: &SavedUsage) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(name.to_owned(), record.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SavedUsage>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(name).cloned())
    }

    fn exists(&self, name: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(name))
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(name);
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = records.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
