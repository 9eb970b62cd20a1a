//! Worker tasks that back the runtime orchestration.
//!
//! The persistence worker keeps repository I/O off the caller's path.

mod persistence;

pub use persistence::{Command, PersistenceError, PersistenceWorker};
