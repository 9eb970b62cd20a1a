//! Session façade around one open character.
//!
//! A session forwards every operation to the [`Character`] aggregate and,
//! after each successful mutation, queues a save of the full snapshot on the
//! persistence worker. Queueing never blocks and never fails the operation.

use tokio::sync::mpsc;
use tracing::{error, warn};
use tracker_core::{
    ActionKind, Character, DerivedStats, History, LedgerError, Pool, PoolMaximums, TrackerError,
    UpdateError, Usage, UsageDelta,
};

use crate::workers::Command;

pub struct CharacterSession {
    character: Character,
    persistence: Option<mpsc::UnboundedSender<Command>>,
}

impl CharacterSession {
    pub(crate) fn new(
        character: Character,
        persistence: Option<mpsc::UnboundedSender<Command>>,
    ) -> Self {
        Self {
            character,
            persistence,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn name(&self) -> &str {
        self.character.name()
    }

    pub fn usage(&self) -> &Usage {
        self.character.usage()
    }

    pub fn derived(&self) -> DerivedStats {
        self.character.derived()
    }

    pub fn maximums(&self) -> PoolMaximums {
        self.character.maximums()
    }

    pub fn history(&self) -> &History {
        self.character.history()
    }

    pub fn update(
        &mut self,
        delta: &UsageDelta,
        action: ActionKind,
        annotation: Option<String>,
    ) -> Result<(), LedgerError> {
        let result = self.character.update(delta, action, annotation);
        self.after(result)
    }

    pub fn spend(&mut self, pool: Pool, token: &str) -> Result<(), UpdateError> {
        let result = self.character.spend(pool, token);
        self.after(result)
    }

    pub fn restore(&mut self, pool: Pool, token: &str) -> Result<(), UpdateError> {
        let result = self.character.restore(pool, token);
        self.after(result)
    }

    pub fn convert_channeled(&mut self, token: &str) -> Result<(), UpdateError> {
        let result = self.character.convert_channeled(token);
        self.after(result)
    }

    pub fn short_rest(&mut self) -> Result<(), LedgerError> {
        let result = self.character.short_rest();
        self.after(result)
    }

    pub fn long_rest(&mut self) -> Result<(), LedgerError> {
        let result = self.character.long_rest();
        self.after(result)
    }

    pub fn reset_usage(&mut self) -> Result<(), LedgerError> {
        let result = self.character.reset_usage();
        self.after(result)
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.character.undo();
        if undone {
            self.queue_save();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.character.redo();
        if redone {
            self.queue_save();
        }
        redone
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.character.set_note(note);
        self.queue_save();
    }

    /// Queue a save of the current snapshot.
    pub fn queue_save(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let command = Command::Save {
            name: self.character.name().to_owned(),
            record: self.character.snapshot(),
        };
        if persistence.send(command).is_err() {
            error!(
                "Persistence worker stopped; usage of {} was not saved",
                self.character.name()
            );
        }
    }

    fn after<E: TrackerError>(&self, result: Result<(), E>) -> Result<(), E> {
        match &result {
            Ok(()) => self.queue_save(),
            Err(e) => warn!(
                character = %self.character.name(),
                code = e.error_code(),
                severity = e.severity().as_str(),
                "Rejected: {}",
                e
            ),
        }
        result
    }

    pub(crate) fn into_character(self) -> Character {
        self.character
    }
}
