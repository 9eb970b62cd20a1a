//! Error classification shared by the core error types.
//!
//! `ParseError` and `LedgerError` are declared next to the operations that
//! raise them. Both implement [`TrackerError`] so callers can decide how to
//! report a rejection without matching on every variant. [`UpdateError`]
//! joins them for the character entrypoints that parse and then apply.
//!
//! A rejected operation never leaves counters partially updated.

use crate::input::ParseError;
use crate::ledger::LedgerError;

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Well-formed request that does not fit right now, e.g. a spend larger
    /// than the free capacity. Freeing points first makes it succeed.
    Recoverable,

    /// Malformed input such as an unparsable amount token.
    Validation,
}

impl ErrorSeverity {
    /// Lowercase name, used as a structured log field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }
}

/// Implemented by every core error enum.
pub trait TrackerError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, e.g. `"INVALID_INPUT"`.
    ///
    /// Falls back to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by a character mutation.
///
/// Both variants are expected during normal play and are meant to be shown
/// inline to the user; neither changes any counter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl TrackerError for UpdateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Parse(e) => e.severity(),
            Self::Ledger(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
        }
    }
}
