use std::collections::VecDeque;

use crate::event::Event;

/// FIFO event queue between the input loop and the module registry.
///
/// Each loop iteration publishes input, tick, and lifecycle events, then
/// drains them in order and hands each one to
/// [`crate::registry::ModuleRegistry::broadcast`].
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue an event at the back of the queue.
    pub fn publish(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Enqueue several events, keeping their order.
    pub fn publish_all(&mut self, events: impl IntoIterator<Item = Event>) {
        self.queue.extend(events);
    }

    /// Remove and return all pending events, preserving insertion order.
    pub fn drain(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn drain_returns_all_and_empties() {
        let mut bus = EventBus::new();
        bus.publish(Event::Tick {
            now: Instant::now(),
        });
        bus.publish(Event::Quit);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(!bus.has_pending());
    }

    #[test]
    fn drain_on_empty_returns_empty() {
        let mut bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn has_pending_tracks_queue() {
        let mut bus = EventBus::new();
        assert!(!bus.has_pending());
        bus.publish(Event::Quit);
        assert!(bus.has_pending());
        bus.drain();
        assert!(!bus.has_pending());
    }

    #[test]
    fn publish_all_preserves_order() {
        let mut bus = EventBus::new();
        bus.publish_all(vec![
            Event::ModuleDeactivated {
                id: "dashboard".into(),
            },
            Event::ModuleActivated { id: "help".into() },
        ]);
        bus.publish(Event::Quit);
        let events = bus.drain();
        assert!(matches!(&events[0], Event::ModuleDeactivated { id } if id == "dashboard"));
        assert!(matches!(&events[1], Event::ModuleActivated { id } if id == "help"));
        assert!(matches!(&events[2], Event::Quit));
    }
}
