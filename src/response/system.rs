// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System list response parsing.

use serde::{Deserialize, Serialize};

/// Response to the system list query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemsResponse {
    /// The systems attached to the webserver.
    #[serde(default)]
    pub systems: Vec<SystemInfo>,
}

/// Information about one HVAC system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// System ID.
    #[serde(rename = "systemID")]
    pub system_id: u32,

    /// Control board firmware version.
    #[serde(rename = "system_firmware", default)]
    pub firmware: Option<String>,

    /// System type code.
    #[serde(rename = "system_type", default)]
    pub system_type: Option<u32>,

    /// Manufacturer of the indoor unit.
    #[serde(default)]
    pub manufacturer: Option<String>,

    /// Instantaneous power consumption in watts, if metered.
    #[serde(default)]
    pub power: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_systems() {
        let json = r#"{"systems": [
            {"systemID": 1, "system_firmware": "3.31", "system_type": 1, "manufacturer": "Daikin"},
            {"systemID": 2}
        ]}"#;
        let response: SystemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.systems.len(), 2);
        assert_eq!(response.systems[0].manufacturer.as_deref(), Some("Daikin"));
        assert_eq!(response.systems[1].firmware, None);
    }
}
