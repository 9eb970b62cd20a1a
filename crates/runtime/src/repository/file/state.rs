//! File-based UsageRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracker_core::SavedUsage;

use crate::repository::{RepositoryError, Result, UsageRepository};

const FILE_PREFIX: &str = "character_";
const FILE_SUFFIX: &str = ".json";

/// File-based implementation of UsageRepository.
///
/// Stores one pretty-printed JSON file per character.
///
/// # File Format
///
/// Snapshots are stored as `character_{name}.json` with the flat nine
/// counters and the note:
///
/// ```json
/// { "consumed_lp": 4, "exhausted_lp": 0, ..., "note": "poisoned" }
/// ```
///
/// Bytes of the name outside `[A-Za-z0-9_-]` are percent-encoded so every
/// name maps to one portable file name and back.
pub struct FileUsageRepository {
    base_dir: PathBuf,
}

impl FileUsageRepository {
    /// Create a new file-based usage repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a snapshot file.
    fn record_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(RepositoryError::InvalidName(name.to_owned()));
        }
        Ok(self
            .base_dir
            .join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", encode_name(name))))
    }
}

impl UsageRepository for FileUsageRepository {
    fn save(&self, name: &str, record: &SavedUsage) -> Result<()> {
        let path = self.record_path(name)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved usage[{}] to {}", name, path.display());

        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<SavedUsage>> {
        let path = self.record_path(name)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let record: SavedUsage = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded usage[{}] from {}", name, path.display());

        Ok(Some(record))
    }

    fn exists(&self, name: &str) -> bool {
        self.record_path(name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted usage[{}]", name);
        }

        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(encoded) = filename
                    .strip_prefix(FILE_PREFIX)
                    .and_then(|s| s.strip_suffix(FILE_SUFFIX))
                && let Some(name) = decode_name(encoded)
            {
                names.push(name);
            }
        }

        names.sort_unstable();
        Ok(names)
    }
}

fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_name(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut rest = encoded.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok().filter(|name| !name.is_empty())
}
