// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the Airzone local API.
//!
//! The coordinator talks to the webserver only through the [`AirzoneApi`]
//! trait. [`HttpClient`] is the HTTP implementation; tests substitute an
//! in-memory implementation.
//!
//! # Queries
//!
//! | Method | Data | Role |
//! |--------|------|------|
//! | [`get_hvac`](AirzoneApi::get_hvac) | zones of all systems | primary |
//! | [`get_dhw`](AirzoneApi::get_dhw) | hot water tank | secondary |
//! | [`get_hvac_systems`](AirzoneApi::get_hvac_systems) | system list | secondary |
//! | [`get_version`](AirzoneApi::get_version) | API version | secondary |
//! | [`get_webserver`](AirzoneApi::get_webserver) | webserver info | secondary |

use std::future::Future;
use std::sync::Arc;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::error::Result;
use crate::response::{HotWater, HvacResponse, SystemsResponse, VersionResponse, WebServerInfo};

/// Read-only queries offered by an Airzone webserver.
///
/// Every query is independent: implementations must not rely on call order.
/// Errors that only mean "this installation lacks the feature" are reported
/// as [`ApiError`](crate::error::ApiError) variants so callers can tell them
/// apart from transport failures.
pub trait AirzoneApi: Send + Sync {
    /// Fetches the hot water tank reading.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HotWaterNotAvailable` when no tank is installed.
    fn get_dhw(&self) -> impl Future<Output = Result<HotWater>> + Send;

    /// Fetches every zone of every system.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    fn get_hvac(&self) -> impl Future<Output = Result<HvacResponse>> + Send;

    /// Fetches the system list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SystemOutOfRange` on webservers without system
    /// information.
    fn get_hvac_systems(&self) -> impl Future<Output = Result<SystemsResponse>> + Send;

    /// Fetches the local API version.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    fn get_version(&self) -> impl Future<Output = Result<VersionResponse>> + Send;

    /// Fetches webserver information.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidMethod` on firmware without this endpoint.
    fn get_webserver(&self) -> impl Future<Output = Result<WebServerInfo>> + Send;
}

impl<T: AirzoneApi> AirzoneApi for Arc<T> {
    fn get_dhw(&self) -> impl Future<Output = Result<HotWater>> + Send {
        (**self).get_dhw()
    }

    fn get_hvac(&self) -> impl Future<Output = Result<HvacResponse>> + Send {
        (**self).get_hvac()
    }

    fn get_hvac_systems(&self) -> impl Future<Output = Result<SystemsResponse>> + Send {
        (**self).get_hvac_systems()
    }

    fn get_version(&self) -> impl Future<Output = Result<VersionResponse>> + Send {
        (**self).get_version()
    }

    fn get_webserver(&self) -> impl Future<Output = Result<WebServerInfo>> + Send {
        (**self).get_webserver()
    }
}
