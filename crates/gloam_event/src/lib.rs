//! # gloam_event - Event Channels
//!
//! Typed FIFO event queues drained once per simulation tick.
//!
//! All mutation in the encounter simulation is confined to a single logic
//! thread, so channels are plain queues with no locking discipline.

use std::collections::VecDeque;

/// Channel for single-type events
#[derive(Debug, Clone)]
pub struct EventChannel<E> {
    queue: VecDeque<E>,
}

impl<E> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Send an event
    pub fn send(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Receive the oldest pending event
    pub fn receive(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    /// Drain all pending events in send order
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    /// Drop all pending events without delivering them
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub mod prelude {
    pub use crate::EventChannel;
}
