// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only entities built from coordinator snapshots.
//!
//! A [`SensorEntity`] projects one field of the snapshot (a zone's
//! temperature, the hot water temperature, ...) into an [`EntityState`].
//! The [`SensorPlatform`] creates sensors as their sources appear and
//! updates their states after every poll.
//!
//! # Availability
//!
//! A sensor reports [`EntityState::Unavailable`] when:
//!
//! - the last poll failed, or
//! - its zone (or hot water tank, or webserver) is absent from the snapshot, or
//! - its source does not report the value.

mod platform;
mod sensor;
mod slug;

pub use platform::SensorPlatform;
pub use sensor::{EntitySource, EntityState, SensorEntity, SensorKind};
pub use slug::slugify;
