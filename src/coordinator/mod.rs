// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator.
//!
//! The [`Coordinator`] fetches data from an [`AirzoneApi`](crate::protocol::AirzoneApi)
//! on a fixed interval or on demand, merges it into a
//! [`Snapshot`](crate::state::Snapshot) and notifies listeners.
//!
//! # Health
//!
//! The coordinator has two states, decided solely by the HVAC query of the
//! last poll:
//!
//! - [`Health::Healthy`](crate::state::Health::Healthy) - the query succeeded
//! - [`Health::Unavailable`](crate::state::Health::Unavailable) - it failed
//!   (or no poll has completed yet)
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use airzone_lib::coordinator::{Coordinator, CoordinatorConfig, PollerHandle};
//! use airzone_lib::protocol::HttpConfig;
//!
//! # async fn example() -> airzone_lib::Result<()> {
//! let client = HttpConfig::new("192.168.1.25").into_client()?;
//! let coordinator = Arc::new(Coordinator::new(client, CoordinatorConfig::default())?);
//!
//! coordinator.refresh().await?;
//! let poller = PollerHandle::spawn(Arc::clone(&coordinator));
//!
//! let mut events = coordinator.subscribe();
//! while let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! poller.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod poller;
mod update_coordinator;

pub use config::CoordinatorConfig;
pub use poller::PollerHandle;
pub use update_coordinator::Coordinator;
