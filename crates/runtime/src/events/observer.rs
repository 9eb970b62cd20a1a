//! Bridge from character change notifications to the event bus.

use tracker_core::{ChangeEvent, ChangeObserver};

use super::{Event, EventBus};

/// Publishes every change event of a character to [`Topic::Usage`](super::Topic::Usage).
pub struct BusObserver {
    bus: EventBus,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl ChangeObserver for BusObserver {
    fn on_change(&self, event: &ChangeEvent) {
        self.bus.publish(Event::Usage(event.clone()));
    }
}
