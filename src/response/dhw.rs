// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domestic hot water response parsing.

use serde::{Deserialize, Serialize};

use crate::types::TemperatureUnit;

use super::int_bool;

/// Response to the hot water query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DhwResponse {
    /// The hot water reading.
    pub data: HotWater,
}

/// Hot water tank reading.
///
/// # Examples
///
/// ```
/// use airzone_lib::response::DhwResponse;
///
/// let json = r#"{"data": {"systemID": 0, "acs_temp": 43, "acs_setpoint": 45, "acs_onoff": 1}}"#;
/// let response: DhwResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.data.temp, Some(43.0));
/// assert!(response.data.on);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotWater {
    /// Tank temperature.
    #[serde(rename = "acs_temp", default)]
    pub temp: Option<f64>,

    /// Target tank temperature.
    #[serde(rename = "acs_setpoint", default)]
    pub setpoint: Option<f64>,

    /// Upper bound for the setpoint.
    #[serde(rename = "acs_maxtemp", default)]
    pub max_temp: Option<f64>,

    /// Lower bound for the setpoint.
    #[serde(rename = "acs_mintemp", default)]
    pub min_temp: Option<f64>,

    /// Whether hot water production is switched on.
    #[serde(rename = "acs_onoff", default, with = "int_bool")]
    pub on: bool,

    /// Whether the power (boost) mode is active.
    #[serde(rename = "acs_power", default, with = "int_bool")]
    pub power_mode: bool,

    /// Temperature unit.
    #[serde(default)]
    pub units: TemperatureUnit,
}
