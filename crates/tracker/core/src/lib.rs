//! Resource ledger and derivation rules for Splittermond characters.
//!
//! `tracker-core` owns the canonical rules: the attribute/skill derivation
//! model, the nine usage counters, the undo/redo history and the token parser.
//! All counter mutation flows through [`Character::update`]; storage, event
//! transport and presentation live in the runtime and client crates.
pub mod action;
pub mod character;
pub mod error;
pub mod events;
pub mod history;
pub mod input;
pub mod ledger;
pub mod stats;

pub use action::ActionKind;
pub use character::{AttributeFact, Character, CharacterFacts, PowerGrant, SavedUsage, SkillFact};
pub use error::{ErrorSeverity, TrackerError, UpdateError};
pub use events::{ChangeEvent, ChangeObserver};
pub use history::{History, HistoryEntry};
pub use input::{ParseError, PoolAmounts, parse_amount, parse_count};
pub use ledger::{
    Category, Ledger, LedgerChange, LedgerError, Pool, PoolMaximums, PoolSet, Usage, UsageDelta,
    UsageFields, UsageKey,
};
pub use stats::{
    Attribute, Attributes, DerivedStats, Experience, PowerBonuses, PowerRef, Profile, Race, Skill,
    SkillKind, SkillRanks,
};
