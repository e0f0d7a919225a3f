// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinator event types.

use std::sync::Arc;

use crate::state::{Health, Snapshot, SnapshotDiff};

/// Events emitted by the coordinator after each poll.
///
/// Exactly one of [`Refreshed`](Self::Refreshed) or
/// [`RefreshFailed`](Self::RefreshFailed) is published per poll.
/// [`HealthChanged`](Self::HealthChanged) precedes it when the poll flips
/// the coordinator's health.
///
/// # Examples
///
/// ```
/// use airzone_lib::event::CoordinatorEvent;
/// use airzone_lib::state::Health;
///
/// let event = CoordinatorEvent::HealthChanged { health: Health::Healthy };
/// assert!(event.is_health_change());
/// ```
#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    /// A poll succeeded and produced a new snapshot.
    Refreshed {
        /// The new snapshot.
        snapshot: Arc<Snapshot>,
        /// Zones that appeared or disappeared in this poll.
        diff: SnapshotDiff,
    },

    /// The HVAC query failed; entities are now unavailable.
    RefreshFailed {
        /// Error message.
        error: String,
    },

    /// The coordinator changed health.
    HealthChanged {
        /// The new health.
        health: Health,
    },
}

impl CoordinatorEvent {
    /// Returns `true` if this event concludes a poll.
    #[must_use]
    pub fn is_poll_result(&self) -> bool {
        matches!(self, Self::Refreshed { .. } | Self::RefreshFailed { .. })
    }

    /// Returns `true` if this is a health change event.
    #[must_use]
    pub fn is_health_change(&self) -> bool {
        matches!(self, Self::HealthChanged { .. })
    }

    /// Creates a refreshed event.
    #[must_use]
    pub fn refreshed(snapshot: Arc<Snapshot>, diff: SnapshotDiff) -> Self {
        Self::Refreshed { snapshot, diff }
    }

    /// Creates a refresh failed event.
    #[must_use]
    pub fn refresh_failed(error: impl Into<String>) -> Self {
        Self::RefreshFailed {
            error: error.into(),
        }
    }
}
