//! Action kinds tagging every ledger update.

use crate::ledger::Pool;

/// What caused a ledger update.
///
/// `Replay` marks undo/redo applications: they bypass capacity validation and
/// are never recorded or broadcast.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    SpendLp,
    RestoreLp,
    SpendFocus,
    RestoreFocus,
    SpendSplinters,
    RestoreSplinters,
    ConvertChanneled,
    ShortRest,
    LongRest,
    Reset,
    Replay,
}

impl ActionKind {
    pub const fn spend(pool: Pool) -> Self {
        match pool {
            Pool::Lp => Self::SpendLp,
            Pool::Focus => Self::SpendFocus,
            Pool::Splinters => Self::SpendSplinters,
        }
    }

    pub const fn restore(pool: Pool) -> Self {
        match pool {
            Pool::Lp => Self::RestoreLp,
            Pool::Focus => Self::RestoreFocus,
            Pool::Splinters => Self::RestoreSplinters,
        }
    }

    pub const fn is_replay(&self) -> bool {
        matches!(self, Self::Replay)
    }

    /// Human-readable history line. The annotation is upper-cased.
    pub fn message(&self, annotation: Option<&str>) -> String {
        let info = annotation.map(str::to_uppercase).unwrap_or_default();
        match self {
            Self::SpendLp => format!("{info} damage taken."),
            Self::RestoreLp => format!("{info} LP healed."),
            Self::SpendFocus => format!("{info} focus spent."),
            Self::RestoreFocus => format!("{info} focus restored."),
            Self::SpendSplinters => "Splinter point spent.".to_owned(),
            Self::RestoreSplinters => "Splinter point restored.".to_owned(),
            Self::ConvertChanneled => format!("{info} channeled focus points released."),
            Self::ShortRest => "Short rest taken.".to_owned(),
            Self::LongRest => "Long rest taken.".to_owned(),
            Self::Reset => "All data reset.".to_owned(),
            Self::Replay => String::new(),
        }
    }
}
