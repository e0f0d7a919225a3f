// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener system for coordinator updates.
//!
//! Entities learn about new data through synchronous listeners:
//!
//! - [`SubscriptionId`] - Identifies a listener, used to remove it
//! - [`ListenerRegistry`] - Stores listeners and dispatches updates
//! - [`Listenable`] - Trait for types that accept listeners
//!
//! For async consumers, the [`EventBus`](crate::event::EventBus) carries the
//! same information as broadcast events.

mod callback;
mod listenable;

pub use callback::{ListenerRegistry, SubscriptionId};
pub use listenable::Listenable;
