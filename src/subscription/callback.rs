// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener management for coordinator updates.
//!
//! - [`SubscriptionId`] - Unique identifier for removing a listener
//! - [`ListenerRegistry`] - Registry for storing and dispatching listeners

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::{CoordinatorState, Health};

/// Unique identifier for a listener.
///
/// Returned when a listener is added; pass it to
/// [`remove_listener`](ListenerRegistry::remove_listener) to detach it.
/// IDs are unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Listener called after every poll with the published state.
type UpdateCallback = Arc<dyn Fn(&CoordinatorState) + Send + Sync>;

/// Listener called when the coordinator changes health.
type HealthCallback = Arc<dyn Fn(Health) + Send + Sync>;

/// Registry for coordinator listeners.
///
/// Listeners run synchronously on the polling task, in the order they
/// were added. The registry lock is released before any listener runs,
/// so a listener may add or remove listeners.
pub struct ListenerRegistry {
    next_id: AtomicU64,
    update_callbacks: RwLock<BTreeMap<SubscriptionId, UpdateCallback>>,
    health_callbacks: RwLock<BTreeMap<SubscriptionId, HealthCallback>>,
}

impl ListenerRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            update_callbacks: RwLock::new(BTreeMap::new()),
            health_callbacks: RwLock::new(BTreeMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a listener for poll results.
    pub fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CoordinatorState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.update_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a listener for health transitions.
    pub fn on_health_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Health) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.health_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `true` if the listener was found and removed.
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.update_callbacks.write().remove(&id).is_some()
            || self.health_callbacks.write().remove(&id).is_some()
    }

    /// Removes all listeners.
    pub fn clear(&self) {
        self.update_callbacks.write().clear();
        self.health_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Calls every update listener with the given state.
    pub fn dispatch_update(&self, state: &CoordinatorState) {
        let callbacks: Vec<_> = self.update_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(state);
        }
    }

    /// Calls every health listener with the new health.
    pub fn dispatch_health(&self, health: Health) {
        let callbacks: Vec<_> = self.health_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(health);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.update_callbacks.read().len() + self.health_callbacks.read().len()
    }

    /// Returns `true` if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listener_count", &self.listener_count())
            .finish_non_exhaustive()
    }
}
