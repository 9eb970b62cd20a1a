//! High-level tracker orchestrator.
//!
//! The tracker owns the persistence worker, wires up the command channel and
//! the event bus, and exposes a builder-based API for clients to open
//! character sessions.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracker_core::{Character, CharacterFacts};

use crate::api::{CharacterSession, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{BusObserver, Event, EventBus, Topic};
use crate::repository::{FileUsageRepository, UsageRepository};
use crate::workers::{Command, PersistenceWorker};

struct Persistence {
    repository: Arc<dyn UsageRepository>,
    command_tx: mpsc::UnboundedSender<Command>,
    worker_handle: JoinHandle<()>,
}

/// Main tracker that hands out character sessions
///
/// Design: the tracker owns the persistence worker; each
/// [`CharacterSession`] owns its character and a sender into that worker.
pub struct Tracker {
    config: RuntimeConfig,
    bus: EventBus,
    persistence: Option<Persistence>,
}

impl Tracker {
    /// Create a new tracker builder
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence.is_some()
    }

    /// Open a session for a character.
    ///
    /// Restores the last saved usage and note of the character when one
    /// exists; otherwise the session starts with all counters at zero.
    pub fn open(&self, facts: &CharacterFacts) -> Result<CharacterSession> {
        let saved = match &self.persistence {
            Some(persistence) => persistence
                .repository
                .load(&facts.name)
                .map_err(|source| RuntimeError::LoadUsage {
                    name: facts.name.clone(),
                    source,
                })?,
            None => None,
        };

        let restored = saved.is_some();
        let mut character = Character::from_facts(facts, saved);
        character.subscribe(Arc::new(BusObserver::new(self.bus.clone())));

        info!(
            character = %character.name(),
            restored,
            "Opened character session"
        );

        let command_tx = self
            .persistence
            .as_ref()
            .map(|persistence| persistence.command_tx.clone());
        Ok(CharacterSession::new(character, command_tx))
    }

    /// Close a session after queueing a final save of its state.
    pub fn close(&self, session: CharacterSession) -> Character {
        session.queue_save();
        debug!("Closed character session {}", session.name());
        session.into_character()
    }

    /// Names of all characters with a saved snapshot.
    pub fn list_saved(&self) -> Result<Vec<String>> {
        match &self.persistence {
            Some(persistence) => Ok(persistence.repository.list_names()?),
            None => Ok(Vec::new()),
        }
    }

    /// Wait until every save queued so far has been handled.
    pub async fn flush(&self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        persistence
            .command_tx
            .send(Command::Flush { reply: reply_tx })
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Shutdown the tracker gracefully
    ///
    /// Saves queued before this call are still written.
    pub async fn shutdown(self) -> Result<()> {
        let Some(persistence) = self.persistence else {
            return Ok(());
        };

        persistence
            .command_tx
            .send(Command::Shutdown)
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        persistence
            .worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!("Tracker shut down");
        Ok(())
    }
}

/// Builder for [`Tracker`] with flexible configuration.
pub struct TrackerBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn UsageRepository>>,
    bus: Option<EventBus>,
}

impl TrackerBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom repository instead of the file repository under
    /// [`RuntimeConfig::usage_dir`]. Ignored when persistence is disabled.
    pub fn repository(mut self, repository: Arc<dyn UsageRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Share an existing event bus
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn enable_persistence(mut self, enable: bool) -> Self {
        self.config.enable_persistence = enable;
        self
    }

    /// Build the tracker
    pub async fn build(self) -> Result<Tracker> {
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_capacity));

        let persistence = if self.config.enable_persistence {
            let repository: Arc<dyn UsageRepository> = match self.repository {
                Some(repository) => repository,
                None => Arc::new(FileUsageRepository::new(self.config.usage_dir())?),
            };

            let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();
            let worker = PersistenceWorker::new(repository.clone(), command_rx, bus.clone());
            let worker_handle = tokio::spawn(async move {
                worker.run().await;
            });

            Some(Persistence {
                repository,
                command_tx,
                worker_handle,
            })
        } else {
            info!("Persistence disabled; usage will not be saved");
            None
        };

        Ok(Tracker {
            config: self.config,
            bus,
            persistence,
        })
    }
}
