//! Character aggregate: profile, ledger, history and observers of one
//! character.
//!
//! [`Character::update`] is the only mutation path for usage counters. Every
//! higher-level action (spend, restore, convert, rests, reset) builds a
//! [`UsageDelta`] and routes it through `update`; undo and redo route the
//! recorded fragments through the ledger as replays.

mod facts;

pub use facts::{AttributeFact, CharacterFacts, PowerGrant, SavedUsage, SkillFact};

use std::sync::Arc;

use crate::action::ActionKind;
use crate::error::UpdateError;
use crate::events::{ChangeEvent, ChangeObserver};
use crate::history::{History, HistoryEntry};
use crate::input::{parse_amount, parse_count};
use crate::ledger::{
    Category, Ledger, LedgerError, Pool, PoolMaximums, Usage, UsageDelta, UsageKey,
};
use crate::stats::{DerivedStats, Profile};

/// Direction of a parsed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Spend,
    Restore,
}

pub struct Character {
    name: String,
    profile: Profile,
    ledger: Ledger,
    history: History,
    note: String,
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl Character {
    /// Fresh character with an empty ledger.
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self {
            name: name.into(),
            profile,
            ledger: Ledger::default(),
            history: History::new(),
            note: String::new(),
            observers: Vec::new(),
        }
    }

    /// Build a character from loader facts and its saved snapshot, if any.
    ///
    /// The snapshot is taken as-is: a sheet edited since the last session may
    /// leave a pool over capacity until usage is freed again.
    pub fn from_facts(facts: &CharacterFacts, saved: Option<SavedUsage>) -> Self {
        let mut character = Self::new(facts.name.clone(), facts.profile());
        if let Some(saved) = saved {
            character.ledger = Ledger::new(saved.usage);
            character.note = saved.note;
        }
        character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn usage(&self) -> &Usage {
        self.ledger.usage()
    }

    /// Derived values for the current LP usage. Recomputed on every call.
    pub fn derived(&self) -> DerivedStats {
        DerivedStats::compute(
            &self.profile,
            self.usage().of(Pool::Lp, Category::Consumed),
        )
    }

    pub fn maximums(&self) -> PoolMaximums {
        PoolMaximums {
            lp: self.profile.max_lp(),
            focus: self.profile.max_focus(),
            splinters: self.profile.max_splinters(),
        }
    }

    pub fn free(&self, pool: Pool) -> i64 {
        self.usage().free(pool, &self.maximums())
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Replace the note. Not a ledger change: no history, no observers.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Record handed to the storage collaborator.
    pub fn snapshot(&self) -> SavedUsage {
        SavedUsage {
            usage: *self.usage(),
            note: self.note.clone(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn undo_possible(&self) -> bool {
        self.history.undo_possible()
    }

    pub fn redo_possible(&self) -> bool {
        self.history.redo_possible()
    }

    /// Register an observer for every future non-replay update.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// Apply `delta` through the ledger.
    ///
    /// Non-replay updates are recorded in the history and broadcast to every
    /// observer before this returns. Replays are neither.
    pub fn update(
        &mut self,
        delta: &UsageDelta,
        action: ActionKind,
        annotation: Option<String>,
    ) -> Result<(), LedgerError> {
        let maximums = self.maximums();
        let change = self.ledger.apply(delta, &maximums, action)?;
        if action.is_replay() {
            return Ok(());
        }

        let entry = HistoryEntry::new(change, action, annotation);
        let event = ChangeEvent {
            character: self.name.clone(),
            before: entry.before.clone(),
            after: entry.after.clone(),
            action,
            annotation: entry.annotation.clone(),
            at: entry.recorded_at,
        };
        self.history.record(entry);
        for observer in &self.observers {
            observer.on_change(&event);
        }
        Ok(())
    }

    /// Spend points of `pool` as described by `token`.
    pub fn spend(&mut self, pool: Pool, token: &str) -> Result<(), UpdateError> {
        self.change(pool, token, Sign::Spend)
    }

    /// Give back points of `pool` as described by `token`.
    ///
    /// Each category is lowered by at most its current value. A restore never
    /// fails for lack of capacity, even on a pool loaded over its maximum.
    pub fn restore(&mut self, pool: Pool, token: &str) -> Result<(), UpdateError> {
        self.change(pool, token, Sign::Restore)
    }

    fn change(&mut self, pool: Pool, token: &str, sign: Sign) -> Result<(), UpdateError> {
        let amounts = parse_amount(pool, token)?;
        let usage = *self.usage();

        let mut delta = UsageDelta::new();
        let mut total: i64 = 0;
        for category in Category::ALL {
            let key = UsageKey::new(pool, category);
            let current = usage.get(key);
            let amount = amounts.get(category);
            let next = match sign {
                Sign::Spend => current.saturating_add(amount),
                Sign::Restore => current.saturating_sub(amount),
            };
            total += i64::from(next) - i64::from(current);
            if amount > 0 {
                delta.set(key, next);
            }
        }

        let free = self.free(pool);
        if sign == Sign::Spend && total > free {
            return Err(LedgerError::InsufficientCapacity {
                pool,
                missing: (total - free).unsigned_abs(),
            }
            .into());
        }

        let action = match sign {
            Sign::Spend => ActionKind::spend(pool),
            Sign::Restore => ActionKind::restore(pool),
        };
        self.update(&delta, action, Some(token.to_owned()))?;
        Ok(())
    }

    /// Turn channeled focus into exhausted focus.
    ///
    /// `token` is a plain count; at most the currently channeled focus is
    /// converted. Used focus stays the same.
    pub fn convert_channeled(&mut self, token: &str) -> Result<(), UpdateError> {
        let requested = parse_count(token)?;
        let usage = *self.usage();
        let channeled = usage.of(Pool::Focus, Category::Channeled);
        let exhausted = usage.of(Pool::Focus, Category::Exhausted);
        let value = requested.min(channeled);

        let delta = UsageDelta::new()
            .with(Pool::Focus, Category::Channeled, channeled - value)
            .with(Pool::Focus, Category::Exhausted, exhausted.saturating_add(value));
        self.update(&delta, ActionKind::ConvertChanneled, Some(token.to_owned()))?;
        Ok(())
    }

    /// Recover exhausted LP and focus.
    pub fn short_rest(&mut self) -> Result<(), LedgerError> {
        self.update(&short_rest_delta(), ActionKind::ShortRest, None)
    }

    /// Recover exhausted and channeled LP and focus, and regenerate consumed
    /// LP and focus by their regeneration rates.
    pub fn long_rest(&mut self) -> Result<(), LedgerError> {
        let delta = long_rest_delta(
            self.usage(),
            self.profile.lp_regeneration(),
            self.profile.focus_regeneration(),
        );
        self.update(&delta, ActionKind::LongRest, None)
    }

    /// Zero all nine counters.
    pub fn reset_usage(&mut self) -> Result<(), LedgerError> {
        self.update(&reset_delta(), ActionKind::Reset, None)
    }

    /// Restore the state before the last done entry. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(before) = self.history.step_back().cloned() else {
            return false;
        };
        self.ledger.replay(&before);
        true
    }

    /// Re-apply the next undone entry. Returns `false` when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let Some(after) = self.history.step_forward().cloned() else {
            return false;
        };
        self.ledger.replay(&after);
        true
    }
}

impl core::fmt::Debug for Character {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .field("ledger", &self.ledger)
            .field("history", &self.history)
            .field("note", &self.note)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn short_rest_delta() -> UsageDelta {
    UsageDelta::new()
        .with(Pool::Lp, Category::Exhausted, 0)
        .with(Pool::Focus, Category::Exhausted, 0)
}

fn long_rest_delta(usage: &Usage, lp_regeneration: i32, focus_regeneration: i32) -> UsageDelta {
    [(Pool::Lp, lp_regeneration), (Pool::Focus, focus_regeneration)]
        .into_iter()
        .fold(UsageDelta::new(), |delta, (pool, regeneration)| {
            let regeneration = u32::try_from(regeneration).unwrap_or(0);
            let consumed = usage.of(pool, Category::Consumed);
            delta
                .with(pool, Category::Exhausted, 0)
                .with(pool, Category::Channeled, 0)
                .with(pool, Category::Consumed, consumed - consumed.min(regeneration))
        })
}

fn reset_delta() -> UsageDelta {
    UsageKey::all().map(|key| (key, 0)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use proptest::prelude::*;

    use super::*;
    use crate::error::{ErrorSeverity, TrackerError};
    use crate::input::ParseError;
    use crate::stats::{Attributes, Race};

    /// Human, constitution 3, mystic 2, willpower 3, 0 exp:
    /// lp 8, max_lp 40, max_focus 10, max_splinters 3,
    /// lp regeneration 6, focus regeneration 6.
    fn hero() -> Character {
        let profile = Profile {
            attributes: Attributes {
                constitution: 3,
                mystic: 2,
                willpower: 3,
                ..Attributes::default()
            },
            race: Some(Race::Human),
            ..Profile::default()
        };
        Character::new("Selana", profile)
    }

    fn counters(character: &Character) -> Vec<u32> {
        UsageKey::all().map(|key| character.usage().get(key)).collect()
    }

    #[test]
    fn maximums_follow_profile() {
        let character = hero();
        assert_eq!(
            character.maximums(),
            PoolMaximums {
                lp: 40,
                focus: 10,
                splinters: 3
            }
        );
    }

    #[test]
    fn spend_records_history_with_annotation() {
        let mut character = hero();
        character.spend(Pool::Focus, "k2v1").unwrap();

        assert_eq!(character.usage().of(Pool::Focus, Category::Channeled), 1);
        assert_eq!(character.usage().of(Pool::Focus, Category::Consumed), 1);
        let entry = &character.history().entries()[0];
        assert_eq!(entry.action, ActionKind::SpendFocus);
        assert_eq!(entry.message(), "K2V1 focus spent.");
    }

    #[test]
    fn spend_beyond_free_is_rejected_without_change() {
        let mut character = hero();
        character.spend(Pool::Splinters, "2").unwrap();
        let err = character.spend(Pool::Splinters, "k2").unwrap_err();

        assert_eq!(
            err,
            UpdateError::Ledger(LedgerError::InsufficientCapacity {
                pool: Pool::Splinters,
                missing: 1
            })
        );
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(character.usage().used(Pool::Splinters), 2);
        assert_eq!(character.history().len(), 1);
    }

    #[test]
    fn parse_error_leaves_ledger_alone() {
        let mut character = hero();
        let err = character.spend(Pool::Focus, "k2v4").unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Parse(ParseError::ConsumedExceedsTotal { .. })
        ));
        assert!(character.usage().is_zero());
        assert!(character.history().is_empty());
    }

    #[test]
    fn restore_is_clamped_per_category() {
        let mut character = hero();
        character.spend(Pool::Lp, "b3").unwrap();
        character.restore(Pool::Lp, "b10").unwrap();
        assert_eq!(character.usage().of(Pool::Lp, Category::Exhausted), 0);
        assert_eq!(
            character.history().entries()[1].message(),
            "B10 LP healed."
        );
    }

    #[test]
    fn convert_channeled_moves_at_most_channeled() {
        let mut character = hero();
        character.spend(Pool::Focus, "k3").unwrap();
        character.spend(Pool::Focus, "2").unwrap();
        character.convert_channeled("5").unwrap();

        assert_eq!(character.usage().of(Pool::Focus, Category::Channeled), 0);
        assert_eq!(character.usage().of(Pool::Focus, Category::Exhausted), 5);
        assert_eq!(character.usage().used(Pool::Focus), 5);
        assert!(matches!(
            character.convert_channeled("k1"),
            Err(UpdateError::Parse(_))
        ));
    }

    #[test]
    fn rests_and_reset() {
        let mut character = hero();
        character.spend(Pool::Lp, "10").unwrap();
        character.spend(Pool::Lp, "b2").unwrap();
        character.spend(Pool::Focus, "k2").unwrap();
        character.spend(Pool::Splinters, "1").unwrap();

        character.short_rest().unwrap();
        assert_eq!(character.usage().of(Pool::Lp, Category::Exhausted), 0);
        assert_eq!(character.usage().of(Pool::Focus, Category::Channeled), 2);

        character.long_rest().unwrap();
        assert_eq!(character.usage().of(Pool::Lp, Category::Consumed), 4);
        assert_eq!(character.usage().of(Pool::Focus, Category::Channeled), 0);
        assert_eq!(character.usage().used(Pool::Splinters), 1);

        character.reset_usage().unwrap();
        assert!(character.usage().is_zero());
        assert_eq!(
            character.history().entries().last().map(HistoryEntry::message),
            Some("All data reset.".to_owned())
        );
    }

    #[test]
    fn undo_redo_and_branch_truncation() {
        let mut character = hero();
        assert!(!character.undo());
        character.spend(Pool::Lp, "5").unwrap();
        character.spend(Pool::Lp, "3").unwrap();

        assert!(character.undo());
        assert_eq!(character.usage().used(Pool::Lp), 5);
        assert!(character.redo_possible());
        assert!(character.redo());
        assert_eq!(character.usage().used(Pool::Lp), 8);
        assert!(!character.redo());

        character.undo();
        character.spend(Pool::Focus, "1").unwrap();
        assert!(!character.redo_possible());
        assert!(!character.redo());
        assert_eq!(character.usage().used(Pool::Lp), 5);
    }

    #[test]
    fn observers_see_non_replay_updates_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut character = hero();
        character.subscribe(Arc::new(move |event: &ChangeEvent| {
            sink.lock().unwrap().push((event.action, event.annotation.clone()));
        }));

        character.spend(Pool::Lp, "2").unwrap();
        character.short_rest().unwrap();
        character.undo();
        character.redo();
        character.set_note("cursed");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [
                (ActionKind::SpendLp, Some("2".to_owned())),
                (ActionKind::ShortRest, None),
            ]
        );
    }

    #[test]
    fn saved_snapshot_round_trips_through_facts() {
        let facts = CharacterFacts {
            name: "Selana".to_owned(),
            race: "human".to_owned(),
            attributes: vec![AttributeFact {
                id: "constitution".to_owned(),
                value: 3,
            }],
            ..CharacterFacts::default()
        };
        let mut character = Character::from_facts(&facts, None);
        character.spend(Pool::Lp, "k4").unwrap();
        character.set_note("bleeding");

        let restored = Character::from_facts(&facts, Some(character.snapshot()));
        assert_eq!(restored.usage(), character.usage());
        assert_eq!(restored.note(), "bleeding");
        assert!(restored.history().is_empty());
        assert_eq!(restored.derived().max_lp, 40);
    }

    /// Hero with 15 consumed focus against a maximum of 10, as left by a
    /// sheet that lost a focus power since the last save.
    fn overfull_focus() -> Character {
        let facts = CharacterFacts {
            name: "Selana".to_owned(),
            race: "human".to_owned(),
            attributes: vec![
                AttributeFact {
                    id: "mystic".to_owned(),
                    value: 2,
                },
                AttributeFact {
                    id: "willpower".to_owned(),
                    value: 3,
                },
            ],
            ..CharacterFacts::default()
        };
        let saved = SavedUsage {
            usage: Usage::new()
                .with(Pool::Focus, Category::Consumed, 15)
                .with(Pool::Focus, Category::Channeled, 2),
            note: String::new(),
        };
        let character = Character::from_facts(&facts, Some(saved));
        assert_eq!(character.maximums().focus, 10);
        assert_eq!(character.free(Pool::Focus), -7);
        character
    }

    #[test]
    fn restore_on_overfull_pool_succeeds() {
        let mut character = overfull_focus();
        character.restore(Pool::Focus, "v1").unwrap();

        assert_eq!(character.usage().of(Pool::Focus, Category::Consumed), 14);
        assert_eq!(character.free(Pool::Focus), -6);
        assert_eq!(
            character.history().entries()[0].message(),
            "V1 focus restored."
        );
    }

    #[test]
    fn spend_on_overfull_pool_is_still_rejected() {
        let mut character = overfull_focus();
        let err = character.spend(Pool::Focus, "1").unwrap_err();
        assert_eq!(
            err,
            UpdateError::Ledger(LedgerError::InsufficientCapacity {
                pool: Pool::Focus,
                missing: 8
            })
        );
        assert_eq!(character.usage().used(Pool::Focus), 17);
    }

    #[test]
    fn convert_and_rests_on_overfull_pool_succeed() {
        let mut character = overfull_focus();
        character.convert_channeled("2").unwrap();
        assert_eq!(character.usage().of(Pool::Focus, Category::Channeled), 0);
        assert_eq!(character.usage().of(Pool::Focus, Category::Exhausted), 2);
        assert_eq!(character.usage().used(Pool::Focus), 17);

        character.short_rest().unwrap();
        assert_eq!(character.usage().used(Pool::Focus), 15);

        character.long_rest().unwrap();
        assert_eq!(character.usage().of(Pool::Focus, Category::Consumed), 9);
        assert_eq!(character.history().len(), 3);
    }

    fn any_usage() -> impl Strategy<Value = Usage> {
        proptest::collection::vec(0u32..8, 9).prop_map(|values| {
            UsageKey::all()
                .zip(values)
                .fold(Usage::new(), |usage, (key, value)| {
                    usage.with(key.pool, key.category, value)
                })
        })
    }

    fn loaded(usage: Usage) -> Character {
        let mut character = hero();
        character.ledger = Ledger::new(usage);
        character
    }

    proptest! {
        #[test]
        fn reset_always_zeroes(usage in any_usage()) {
            let mut character = loaded(usage);
            character.reset_usage().unwrap();
            prop_assert!(character.usage().is_zero());
        }

        #[test]
        fn short_rest_touches_only_exhausted_lp_and_focus(usage in any_usage()) {
            let mut character = loaded(usage);
            character.short_rest().unwrap();
            for key in UsageKey::all() {
                let expected = match (key.pool, key.category) {
                    (Pool::Lp | Pool::Focus, Category::Exhausted) => 0,
                    _ => usage.get(key),
                };
                prop_assert_eq!(character.usage().get(key), expected);
            }
        }

        #[test]
        fn long_rest_regenerates_within_rate(usage in any_usage()) {
            let mut character = loaded(usage);
            character.long_rest().unwrap();
            for pool in [Pool::Lp, Pool::Focus] {
                let before = usage.of(pool, Category::Consumed);
                let after = character.usage().of(pool, Category::Consumed);
                prop_assert!(after <= before);
                prop_assert!(before - after <= 6);
                prop_assert_eq!(after, before.saturating_sub(6));
                prop_assert_eq!(character.usage().of(pool, Category::Exhausted), 0);
                prop_assert_eq!(character.usage().of(pool, Category::Channeled), 0);
            }
            for category in Category::ALL {
                prop_assert_eq!(
                    character.usage().of(Pool::Splinters, category),
                    usage.of(Pool::Splinters, category)
                );
            }
        }

        #[test]
        fn undo_then_redo_round_trips(
            tokens in proptest::collection::vec((0usize..3, "[bk]?[0-9]"), 1..6)
        ) {
            let mut character = hero();
            for (pool, token) in &tokens {
                let _ = character.spend(Pool::ALL[*pool], token);
            }
            let applied = counters(&character);
            if character.undo() {
                prop_assert!(character.redo());
            }
            prop_assert_eq!(counters(&character), applied);
        }
    }
}
