//! Persistence worker for fire-and-forget usage saves.
//!
//! Sessions queue a full snapshot after every successful mutation. The worker
//! writes snapshots in queue order; a failed save is logged and published on
//! [`Topic::Persistence`](crate::events::Topic) but never touches in-memory
//! state. The next mutation of the same character simply saves again.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};
use tracker_core::SavedUsage;

use crate::events::{Event, EventBus, PersistenceEvent};
use crate::repository::{RepositoryError, UsageRepository};

/// Errors that can occur during persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to save usage of {name}")]
    Save {
        name: String,
        #[source]
        source: RepositoryError,
    },
}

/// Commands that can be sent to the persistence worker
pub enum Command {
    /// Write the snapshot of one character
    Save { name: String, record: SavedUsage },

    /// Reply once every previously queued save has been handled
    Flush { reply: oneshot::Sender<()> },

    /// Shutdown the worker gracefully
    Shutdown,
}

/// Background worker that writes usage snapshots
pub struct PersistenceWorker {
    repository: Arc<dyn UsageRepository>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    bus: EventBus,
}

impl PersistenceWorker {
    pub fn new(
        repository: Arc<dyn UsageRepository>,
        command_rx: mpsc::UnboundedReceiver<Command>,
        bus: EventBus,
    ) -> Self {
        Self {
            repository,
            command_rx,
            bus,
        }
    }

    /// Main worker loop
    pub async fn run(mut self) {
        info!("PersistenceWorker started");

        while let Some(command) = self.command_rx.recv().await {
            if !self.handle(command) {
                info!("Shutdown command received");
                break;
            }
        }

        // Drain saves queued before the shutdown request
        self.command_rx.close();
        while let Ok(command) = self.command_rx.try_recv() {
            self.handle(command);
        }

        info!("PersistenceWorker stopped");
    }

    /// Returns `false` on shutdown.
    fn handle(&self, command: Command) -> bool {
        match command {
            Command::Save { name, record } => self.handle_save(name, &record),
            Command::Flush { reply } => {
                let _ = reply.send(());
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn handle_save(&self, name: String, record: &SavedUsage) {
        let event = match self.save(&name, record) {
            Ok(()) => {
                debug!("Persisted usage of {}", name);
                PersistenceEvent::Saved { name, at: Utc::now() }
            }
            Err(e) => {
                error!("{}", DisplayChain(&e));
                PersistenceEvent::Failed {
                    name,
                    error: DisplayChain(&e).to_string(),
                    at: Utc::now(),
                }
            }
        };
        self.bus.publish(Event::Persistence(event));
    }

    fn save(&self, name: &str, record: &SavedUsage) -> Result<(), PersistenceError> {
        self.repository
            .save(name, record)
            .map_err(|source| PersistenceError::Save {
                name: name.to_owned(),
                source,
            })
    }
}

/// Formats an error followed by its source chain: `outer: inner: root`.
struct DisplayChain<'a>(&'a (dyn std::error::Error + 'static));

impl std::fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}
