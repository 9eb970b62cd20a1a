//! Runtime orchestration for the character resource tracker.
//!
//! This crate wires the [`tracker_core::Character`] aggregate to storage and
//! observers. Consumers build a [`Tracker`], open a [`CharacterSession`] per
//! character, and subscribe to the [`EventBus`] for change and save events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the session and error types clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores usage snapshots
//! - `workers` keeps the persistence task internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{CharacterSession, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use events::{BusObserver, Event, EventBus, PersistenceEvent, Topic};
pub use repository::{FileUsageRepository, InMemoryUsageRepo, RepositoryError, UsageRepository};
pub use runtime::{Tracker, TrackerBuilder};
pub use workers::PersistenceError;
