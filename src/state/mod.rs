// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polled state.
//!
//! A [`Snapshot`] holds the merged data of one poll. The coordinator wraps
//! it in a [`CoordinatorState`] together with its [`Health`] and publishes
//! the result after every poll, successful or not.

mod coordinator_state;
mod snapshot;

pub use coordinator_state::{CoordinatorState, Health};
pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotDiff};
