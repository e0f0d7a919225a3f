// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for coordinator updates.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that any number of
//! async consumers can follow poll results.
//!
//! # Examples
//!
//! ```
//! use airzone_lib::event::{CoordinatorEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(CoordinatorEvent::refresh_failed("timeout"));
//! ```

mod coordinator_event;
mod event_bus;

pub use coordinator_event::CoordinatorEvent;
pub use event_bus::EventBus;
pub(crate) use event_bus::DEFAULT_CHANNEL_CAPACITY;
