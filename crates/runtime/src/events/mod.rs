//! Topic-based event bus for runtime events.
//!
//! Usage changes and persistence outcomes are published to separate topics;
//! consumers subscribe only to the topics they need.

mod bus;
mod observer;
mod types;

pub use bus::{DEFAULT_CAPACITY, Event, EventBus, Topic};
pub use observer::BusObserver;
pub use types::PersistenceEvent;
