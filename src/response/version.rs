// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware and webserver information parsing.

use serde::{Deserialize, Serialize};

/// Response to the API version query.
///
/// # Examples
///
/// ```
/// use airzone_lib::response::VersionResponse;
///
/// let response: VersionResponse = serde_json::from_str(r#"{"version": "1.62"}"#).unwrap();
/// assert_eq!(response.version, "1.62");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Local API version.
    pub version: String,
}

/// Response to the webserver query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebServerInfo {
    /// MAC address of the webserver.
    #[serde(default)]
    pub mac: Option<String>,

    /// Webserver firmware version.
    #[serde(rename = "ws_firmware", default)]
    pub firmware: Option<String>,

    /// Webserver hardware type.
    #[serde(rename = "ws_type", default)]
    pub ws_type: Option<String>,

    /// Network interface in use (`wifi` or `ethernet`).
    #[serde(default)]
    pub interface: Option<String>,

    /// Wi-Fi channel.
    #[serde(default)]
    pub wifi_channel: Option<u8>,

    /// Wi-Fi signal strength in dBm.
    #[serde(default)]
    pub wifi_rssi: Option<i32>,
}
