//! Broadcast channels per topic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracker_core::ChangeEvent;

use super::types::PersistenceEvent;

/// Default broadcast capacity per topic.
pub const DEFAULT_CAPACITY: usize = 64;

/// Routing key of an [`Event`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Committed usage changes (never replays)
    Usage,
    /// Save outcomes of the persistence worker
    Persistence,
}

/// Everything published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Usage(ChangeEvent),
    Persistence(PersistenceEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Usage(_) => Topic::Usage,
            Event::Persistence(_) => Topic::Persistence,
        }
    }
}

struct Channels {
    usage: broadcast::Sender<Event>,
    persistence: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Usage => &self.usage,
            Topic::Persistence => &self.persistence,
        }
    }
}

/// Cloneable handle to one broadcast channel per [`Topic`].
///
/// Publishing never blocks. A subscriber that falls more than the capacity
/// behind loses the oldest events and sees `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Bus with [`DEFAULT_CAPACITY`] per topic.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Bus with `capacity` buffered events per topic (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                usage: broadcast::channel(capacity).0,
                persistence: broadcast::channel(capacity).0,
            }),
        }
    }

    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            tracing::trace!("Dropped {:?} event without subscribers", topic);
        }
    }

    /// Receiver for events of `topic` published from now on.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn saved(name: &str) -> Event {
        Event::Persistence(PersistenceEvent::Saved {
            name: name.to_owned(),
            at: Utc::now(),
        })
    }

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut usage = bus.subscribe(Topic::Usage);
        let mut persistence = bus.subscribe(Topic::Persistence);

        bus.publish(saved("Selana"));

        assert!(usage.try_recv().is_err());
        match persistence.try_recv() {
            Ok(Event::Persistence(event)) => assert_eq!(event.name(), "Selana"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(saved("nobody"));
        let clone = bus.clone();
        let mut rx = clone.subscribe(Topic::Persistence);
        bus.publish(saved("later"));
        assert!(rx.try_recv().is_ok());
    }
}
