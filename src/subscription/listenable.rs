// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trait for sources that notify listeners after each poll.

use crate::state::{CoordinatorState, Health};
use crate::subscription::SubscriptionId;

/// Trait for types that notify listeners after each poll.
///
/// Implemented by [`Coordinator`](crate::coordinator::Coordinator).
pub trait Listenable {
    /// Adds a listener called after every poll, whether it succeeded or not.
    fn add_listener<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CoordinatorState) + Send + Sync + 'static;

    /// Adds a listener called when the coordinator changes health.
    fn on_health_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Health) + Send + Sync + 'static;

    /// Removes a listener by its subscription ID.
    ///
    /// Returns `true` if the listener was found and removed.
    fn remove_listener(&self, id: SubscriptionId) -> bool;
}
