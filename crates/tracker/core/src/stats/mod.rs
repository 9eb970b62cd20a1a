//! Stat System - the attribute/skill derivation model.
//!
//! # Architecture
//!
//! ```text
//! [ Attributes · Race · Experience · Skill ranks · Powers ]   (Profile, stored)
//!      ↓
//! [ Derived Stats: pools, resistances, skills ]                (computed on read)
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: the profile and the usage ledger are the only stored state
//! 2. **Unidirectional Flow**: derived values never feed back into the profile
//! 3. **Deterministic**: pure functions, no I/O

pub mod attributes;
pub mod derived;
pub mod level;
pub mod powers;
pub mod profile;
pub mod race;
pub mod skills;

pub use attributes::{Attribute, Attributes};
pub use derived::{DerivedStats, wounded_deduction, wounded_level};
pub use level::{Experience, level_for};
pub use powers::{PowerBonuses, PowerRef};
pub use profile::Profile;
pub use race::Race;
pub use skills::{Skill, SkillFormula, SkillKind, SkillRanks};
