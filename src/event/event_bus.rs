// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting coordinator events.

use tokio::sync::broadcast;

use super::CoordinatorEvent;

/// Default channel capacity for the event bus.
pub(crate) const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting coordinator events to multiple subscribers.
///
/// Each subscriber gets its own copy of every event published after it
/// subscribed. A subscriber that falls more than the channel capacity
/// behind loses the oldest events and receives `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use airzone_lib::event::{CoordinatorEvent, EventBus};
///
/// let bus = EventBus::with_capacity(16);
/// let mut rx = bus.subscribe();
/// let mut rx2 = bus.subscribe();
///
/// bus.publish(CoordinatorEvent::refresh_failed("connection refused"));
/// assert_eq!(bus.subscriber_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoordinatorEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. [`CoordinatorConfig`](crate::coordinator::CoordinatorConfig)
    /// validation rejects a zero capacity before it gets here.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to coordinator events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// If there are no subscribers, the event is silently discarded.
    pub fn publish(&self, event: CoordinatorEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
