//! Repository layer for per-character usage snapshots.
//!
//! A repository stores what changes during play: the nine usage counters and
//! the note of each character, keyed by character name. Character sheets
//! themselves are static content and are read by the loader, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileUsageRepository;
pub use memory::InMemoryUsageRepo;
pub use traits::UsageRepository;
