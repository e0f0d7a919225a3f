// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State published by the coordinator after every poll.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Snapshot;

/// Health of the coordinator, decided solely by the HVAC query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Health {
    /// The last HVAC query succeeded.
    Healthy,
    /// The last HVAC query failed, or no poll has completed yet.
    #[default]
    Unavailable,
}

impl Health {
    /// Returns `true` for [`Health::Healthy`].
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str("healthy"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Everything listeners need to know after a poll.
///
/// After a failed poll the snapshot still holds the last successful data,
/// but [`last_update_success`](Self::last_update_success) is `false` and
/// entities must not present it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoordinatorState {
    /// Latest merged data.
    pub snapshot: Arc<Snapshot>,
    /// Current health.
    pub health: Health,
    /// Whether the last poll succeeded.
    pub last_update_success: bool,
    /// Time of the last successful poll.
    pub last_updated: Option<DateTime<Utc>>,
    /// Error message of the last failed poll.
    pub last_error: Option<String>,
}

impl CoordinatorState {
    /// Returns `true` if entities may present the snapshot.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.last_update_success && self.health.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_unavailable() {
        let state = CoordinatorState::default();
        assert_eq!(state.health, Health::Unavailable);
        assert!(!state.is_available());
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn health_display() {
        assert_eq!(Health::Healthy.to_string(), "healthy");
        assert_eq!(Health::Unavailable.to_string(), "unavailable");
    }
}
