//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use crate::events::DEFAULT_CAPACITY;

/// Configuration shared by the tracker orchestrator and its workers.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Root directory for saved usage and logs.
    pub data_dir: PathBuf,
    /// Load and save usage snapshots (default: true)
    pub enable_persistence: bool,
    /// Broadcast capacity per event topic
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            enable_persistence: true,
            event_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRACKER_DATA_DIR` - Storage root (default: platform data directory)
    /// - `TRACKER_PERSISTENCE` - Enable usage persistence (default: true)
    /// - `TRACKER_EVENT_CAPACITY` - Broadcast capacity per topic (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("TRACKER_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(enable) = read_env_bool("TRACKER_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        if let Some(capacity) = read_env::<usize>("TRACKER_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config
    }

    /// Directory holding one JSON snapshot per character.
    pub fn usage_dir(&self) -> PathBuf {
        self.data_dir.join("usage")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Platform data directory, or `./data` when none can be determined.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "splinter-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
