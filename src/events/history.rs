//! Bounded event history.
//!
//! `EventLog` keeps the most recent `capacity` events and drops the oldest
//! first. Backed by `im::Vector` so snapshots of the history are O(1) to
//! clone.

use im::Vector;

use super::event::GameEvent;

/// Ring buffer of recent events.
#[derive(Clone, Debug)]
pub struct EventLog {
    entries: Vector<GameEvent>,
    capacity: usize,
    total: u64,
}

impl EventLog {
    /// Create an empty log holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
            total: 0,
        }
    }

    /// Record an event, evicting the oldest if full.
    pub fn push(&mut self, event: GameEvent) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Record several events in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter()
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events ever pushed, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total = 0;
    }
}
