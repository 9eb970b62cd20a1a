//! Character fact bundle loader.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracker_core::CharacterFacts;

use crate::loaders::{LoadResult, read_file};

/// On-disk format of a fact bundle, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactsFormat {
    Ron,
    Toml,
}

impl FactsFormat {
    /// `None` for extensions other than `.ron` and `.toml`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("ron") {
            Some(Self::Ron)
        } else if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

/// Loader for character fact bundles.
///
/// Example (RON):
/// ```ron
/// (
///     name: "Selana",
///     race: "human",
///     spent_experience: 180,
///     free_experience: 12,
///     powers: [(reference: "focuspool", count: 1)],
///     attributes: [(id: "CONSTITUTION", value: 2)],
///     skills: [(id: "arcanelore", rank: 6)],
/// )
/// ```
pub struct FactsLoader;

impl FactsLoader {
    /// Load one bundle; the format follows the file extension.
    pub fn load(path: &Path) -> LoadResult<CharacterFacts> {
        let format = FactsFormat::from_path(path).with_context(|| {
            format!(
                "Unsupported fact bundle {} (expected .ron or .toml)",
                path.display()
            )
        })?;
        let content = read_file(path)?;
        let facts = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse fact bundle {}", path.display()))?;

        tracing::debug!(path = %path.display(), name = %facts.name, "Loaded character facts");
        Ok(facts)
    }

    /// Parse bundle text in the given format.
    pub fn parse(content: &str, format: FactsFormat) -> LoadResult<CharacterFacts> {
        let facts = match format {
            FactsFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse facts RON: {}", e))?,
            FactsFormat::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse facts TOML: {}", e))?,
        };
        Ok(facts)
    }

    /// Load every bundle in `dir`, sorted by path.
    ///
    /// Files with other extensions are ignored. Bundles that fail to parse
    /// are skipped with a warning so one broken sheet does not hide the rest.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<(PathBuf, CharacterFacts)>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list directory {}", dir.display()))?
                .path();
            if path.is_file() && FactsFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::load(&path) {
                Ok(facts) => loaded.push((path, facts)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), "Skipping fact bundle: {:#}", error);
                }
            }
        }
        Ok(loaded)
    }
}
