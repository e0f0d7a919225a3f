// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Airzone Lib - A Rust library to poll Airzone climate controllers.
//!
//! This library polls an Airzone webserver over its local HTTP API, merges
//! the answers into an immutable snapshot, and exposes the snapshot as
//! read-only sensor entities.
//!
//! # Components
//!
//! - **API client** ([`protocol`]): the [`AirzoneApi`] trait and its HTTP
//!   implementation
//! - **Coordinator** ([`coordinator`]): periodic and on-demand polling,
//!   health tracking, listener and event notification
//! - **Entities** ([`entity`]): sensors such as "temperature of zone X"
//!   that turn unavailable when their data is missing
//!
//! # Quick Start
//!
//! ```no_run
//! use airzone_lib::{AirzoneIntegration, CoordinatorConfig, HttpConfig};
//!
//! #[tokio::main]
//! async fn main() -> airzone_lib::Result<()> {
//!     let http = HttpConfig::new("192.168.1.25");
//!     let integration = AirzoneIntegration::connect(http, CoordinatorConfig::default()).await?;
//!
//!     let mut events = integration.subscribe();
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!         println!("{:?}", integration.state("sensor.salon_temperature"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure Handling
//!
//! Only the HVAC zone query is essential. When it fails the poll fails and
//! every sensor reports unavailable until the next successful poll. The
//! other queries (hot water, systems, version, webserver) may fail without
//! affecting the rest; their part of the snapshot is simply absent.

pub mod coordinator;
pub mod entity;
pub mod error;
pub mod event;
mod integration;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

pub use coordinator::{Coordinator, CoordinatorConfig, PollerHandle};
pub use entity::{EntityState, SensorEntity, SensorKind, SensorPlatform};
pub use error::{ApiError, ConfigError, Error, ParseError, ProtocolError, Result};
pub use event::{CoordinatorEvent, EventBus};
pub use integration::AirzoneIntegration;
pub use protocol::AirzoneApi;
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use state::{CoordinatorState, Health, Snapshot, SnapshotDiff};
pub use subscription::{Listenable, ListenerRegistry, SubscriptionId};
pub use types::{HvacMode, TemperatureUnit, ZoneKey};
