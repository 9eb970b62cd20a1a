//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("usage repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("invalid character name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
