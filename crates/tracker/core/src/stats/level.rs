//! Experience totals and the level step function.

/// Experience points recorded on the character sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experience {
    /// Experience invested into the character.
    pub spent: i32,
    /// Experience earned but not yet invested.
    pub free: i32,
}

impl Experience {
    pub const fn new(spent: i32, free: i32) -> Self {
        Self { spent, free }
    }

    pub const fn total(&self) -> i32 {
        self.spent + self.free
    }

    pub const fn level(&self) -> i32 {
        level_for(self.spent)
    }
}

/// Upper bounds (exclusive) of the level bands, in spent experience.
const LEVEL_THRESHOLDS: [i32; 3] = [100, 300, 600];

/// Character level for an amount of spent experience.
///
/// | spent      | level |
/// |------------|-------|
/// | < 100      | 1     |
/// | 100 .. 300 | 2     |
/// | 300 .. 600 | 3     |
/// | >= 600     | 4     |
pub const fn level_for(spent_experience: i32) -> i32 {
    let mut level = 1;
    let mut i = 0;
    while i < LEVEL_THRESHOLDS.len() {
        if spent_experience >= LEVEL_THRESHOLDS[i] {
            level += 1;
        }
        i += 1;
    }
    level
}
