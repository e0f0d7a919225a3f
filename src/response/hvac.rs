// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC zone response parsing.

use serde::{Deserialize, Serialize};

use crate::types::{HvacMode, TemperatureUnit, ZoneKey};

use super::{int_bool, percent};

/// Response to the all-systems, all-zones HVAC query.
///
/// The webserver groups zones by system, each group wrapped in a `data`
/// array.
///
/// # Examples
///
/// ```
/// use airzone_lib::response::HvacResponse;
///
/// let json = r#"{
///     "systems": [
///         {"data": [{"systemID": 1, "zoneID": 1, "name": "Salon", "on": 1, "roomTemp": 19.6}]}
///     ]
/// }"#;
/// let response: HvacResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.zones().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HvacResponse {
    /// Zone groups, one per system.
    #[serde(default)]
    pub systems: Vec<HvacSystemZones>,
}

impl HvacResponse {
    /// Creates a response holding a single system's zones.
    #[must_use]
    pub fn single_system(zones: Vec<Zone>) -> Self {
        Self {
            systems: vec![HvacSystemZones { data: zones }],
        }
    }

    /// Iterates over every zone of every system.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.systems.iter().flat_map(|system| system.data.iter())
    }
}

/// Zones of one system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HvacSystemZones {
    /// The zones.
    #[serde(default)]
    pub data: Vec<Zone>,
}

/// A single zone reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// System the zone belongs to.
    #[serde(rename = "systemID")]
    pub system_id: u32,

    /// Zone ID within its system.
    #[serde(rename = "zoneID")]
    pub zone_id: u32,

    /// User-assigned zone name.
    #[serde(default)]
    pub name: String,

    /// Whether the zone is switched on.
    #[serde(default, with = "int_bool")]
    pub on: bool,

    /// Measured room temperature.
    #[serde(rename = "roomTemp", default)]
    pub room_temp: Option<f64>,

    /// Target temperature.
    #[serde(default)]
    pub setpoint: Option<f64>,

    /// Upper bound for the setpoint.
    #[serde(rename = "maxTemp", default)]
    pub max_temp: Option<f64>,

    /// Lower bound for the setpoint.
    #[serde(rename = "minTemp", default)]
    pub min_temp: Option<f64>,

    /// Relative humidity in percent, when the thermostat measures it.
    #[serde(default, with = "percent")]
    pub humidity: Option<u8>,

    /// Operating mode of the system this zone belongs to.
    #[serde(default)]
    pub mode: Option<HvacMode>,

    /// Temperature unit of the readings above.
    #[serde(default)]
    pub units: TemperatureUnit,

    /// Air demand active.
    #[serde(default, with = "int_bool")]
    pub air_demand: bool,

    /// Floor (radiant) demand active.
    #[serde(default, with = "int_bool")]
    pub floor_demand: bool,

    /// Thermostat firmware version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermos_firmware: Option<String>,
}

impl Zone {
    /// Returns the stable key of this zone.
    #[must_use]
    pub fn key(&self) -> ZoneKey {
        ZoneKey::new(self.system_id, self.zone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_zone() {
        let json = r#"{
            "systemID": 1, "zoneID": 2, "name": "Dorm Ppal", "on": 1,
            "roomTemp": 21.1, "setpoint": 19.5, "maxTemp": 30, "minTemp": 15,
            "humidity": 39, "mode": 3, "units": 0, "air_demand": 1,
            "floor_demand": 0, "thermos_firmware": "3.33", "coldStage": 1
        }"#;
        let zone: Zone = serde_json::from_str(json).unwrap();

        assert_eq!(zone.key(), ZoneKey::new(1, 2));
        assert_eq!(zone.name, "Dorm Ppal");
        assert!(zone.on);
        assert_eq!(zone.room_temp, Some(21.1));
        assert_eq!(zone.max_temp, Some(30.0));
        assert_eq!(zone.humidity, Some(39));
        assert_eq!(zone.mode, Some(HvacMode::Heating));
        assert!(zone.air_demand);
        assert!(!zone.floor_demand);
        assert_eq!(zone.thermos_firmware.as_deref(), Some("3.33"));
    }

    #[test]
    fn parse_minimal_zone() {
        let zone: Zone = serde_json::from_str(r#"{"systemID": 2, "zoneID": 1}"#).unwrap();
        assert!(zone.name.is_empty());
        assert!(!zone.on);
        assert_eq!(zone.room_temp, None);
        assert_eq!(zone.units, TemperatureUnit::Celsius);
    }

    #[test]
    fn parse_lenient_humidity_and_flags() {
        let json = r#"{
            "systemID": 1, "zoneID": 2, "on": true, "humidity": 39.5,
            "air_demand": false, "floor_demand": 1.0
        }"#;
        let zone: Zone = serde_json::from_str(json).unwrap();

        assert!(zone.on);
        assert_eq!(zone.humidity, Some(40));
        assert!(!zone.air_demand);
        assert!(zone.floor_demand);

        let zone: Zone =
            serde_json::from_str(r#"{"systemID": 1, "zoneID": 3, "humidity": null}"#).unwrap();
        assert_eq!(zone.humidity, None);
    }

    #[test]
    fn one_odd_zone_does_not_break_the_response() {
        let json = r#"{"systems": [{"data": [
            {"systemID": 1, "zoneID": 1, "humidity": 34},
            {"systemID": 1, "zoneID": 2, "humidity": 39.5, "on": true}
        ]}]}"#;
        let response: HvacResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.zones().count(), 2);
    }

    #[test]
    fn zones_flattens_systems() {
        let json = r#"{"systems": [
            {"data": [{"systemID": 1, "zoneID": 1}, {"systemID": 1, "zoneID": 2}]},
            {"data": [{"systemID": 2, "zoneID": 1}]}
        ]}"#;
        let response: HvacResponse = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = response.zones().map(Zone::key).collect();
        assert_eq!(
            keys,
            vec![ZoneKey::new(1, 1), ZoneKey::new(1, 2), ZoneKey::new(2, 1)]
        );
    }
}
