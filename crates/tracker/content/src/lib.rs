//! Character sheet loaders.
//!
//! Reads parsed-fact bundles (RON or TOML) into [`tracker_core::CharacterFacts`].
//! The bundle only carries what the derivation model needs: race code,
//! experience, name, power grants, attribute values and skill ranks.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{FactsFormat, FactsLoader, LoadResult};
