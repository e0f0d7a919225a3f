// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor entities.

use std::fmt;

use serde::Serialize;

use crate::state::{CoordinatorState, Snapshot};
use crate::types::ZoneKey;

use super::slugify;

/// Display name of the hot water device.
pub(crate) const HOT_WATER_NAME: &str = "Airzone DHW";
/// Display name of the webserver device.
pub(crate) const WEBSERVER_NAME: &str = "Airzone WebServer";

/// Part of the snapshot an entity reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntitySource {
    /// A zone.
    Zone(ZoneKey),
    /// The hot water tank.
    HotWater,
    /// The webserver.
    WebServer,
}

impl fmt::Display for EntitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone(key) => write!(f, "{key}"),
            Self::HotWater => f.write_str("dhw"),
            Self::WebServer => f.write_str("ws"),
        }
    }
}

/// The value a sensor presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SensorKind {
    /// Zone room temperature.
    Temperature,
    /// Zone relative humidity.
    Humidity,
    /// Hot water tank temperature.
    HotWaterTemperature,
    /// Webserver Wi-Fi signal strength.
    WifiRssi,
}

impl SensorKind {
    /// Kinds offered for every zone.
    pub const ZONE_KINDS: [SensorKind; 2] = [Self::Temperature, Self::Humidity];

    /// Returns the suffix appended to entity IDs and names.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Temperature | Self::HotWaterTemperature => "temperature",
            Self::Humidity => "humidity",
            Self::WifiRssi => "rssi",
        }
    }

    /// Returns the static unit of measurement, if the kind has one.
    ///
    /// Temperature units depend on the device and are resolved per reading.
    #[must_use]
    pub const fn fixed_unit(&self) -> Option<&'static str> {
        match self {
            Self::Humidity => Some("%"),
            Self::WifiRssi => Some("dBm"),
            Self::Temperature | Self::HotWaterTemperature => None,
        }
    }

    /// Reads this kind's value for `source` from the snapshot.
    ///
    /// Returns `None` when the source is absent or does not report the
    /// value.
    #[must_use]
    pub fn read(&self, source: EntitySource, snapshot: &Snapshot) -> Option<String> {
        match (self, source) {
            (Self::Temperature, EntitySource::Zone(key)) => {
                snapshot.zone(key)?.room_temp.map(|t| t.to_string())
            }
            (Self::Humidity, EntitySource::Zone(key)) => {
                snapshot.zone(key)?.humidity.map(|h| h.to_string())
            }
            (Self::HotWaterTemperature, EntitySource::HotWater) => {
                snapshot.hot_water()?.temp.map(|t| t.to_string())
            }
            (Self::WifiRssi, EntitySource::WebServer) => {
                snapshot.webserver()?.wifi_rssi.map(|r| r.to_string())
            }
            _ => None,
        }
    }
}

/// State of an entity as presented to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EntityState {
    /// The current value, formatted for display.
    Value(String),
    /// No trustworthy value is available.
    Unavailable,
}

impl EntityState {
    /// Creates a value state.
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Returns `true` unless the state is [`EntityState::Unavailable`].
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns the value, if available.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// A read-only sensor projecting one field of the snapshot.
///
/// # Examples
///
/// ```
/// use airzone_lib::entity::{SensorEntity, SensorKind};
/// use airzone_lib::types::ZoneKey;
///
/// let sensor = SensorEntity::zone(ZoneKey::new(1, 2), "Dorm Ppal", SensorKind::Temperature);
/// assert_eq!(sensor.entity_id(), "sensor.dorm_ppal_temperature");
/// assert_eq!(sensor.name(), "Dorm Ppal Temperature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorEntity {
    entity_id: String,
    unique_id: String,
    name: String,
    source: EntitySource,
    kind: SensorKind,
}

impl SensorEntity {
    /// Creates a sensor reading `kind` from `source`, named after `device_name`.
    #[must_use]
    pub fn new(source: EntitySource, device_name: &str, kind: SensorKind) -> Self {
        let suffix = kind.suffix();
        let mut label = suffix.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }

        Self {
            entity_id: format!("sensor.{}_{suffix}", slugify(device_name)),
            unique_id: format!("{source}_{suffix}"),
            name: format!("{device_name} {label}"),
            source,
            kind,
        }
    }

    /// Creates a sensor for a zone.
    #[must_use]
    pub fn zone(key: ZoneKey, zone_name: &str, kind: SensorKind) -> Self {
        Self::new(EntitySource::Zone(key), zone_name, kind)
    }

    /// Creates the hot water temperature sensor.
    #[must_use]
    pub fn hot_water() -> Self {
        Self::new(
            EntitySource::HotWater,
            HOT_WATER_NAME,
            SensorKind::HotWaterTemperature,
        )
    }

    /// Creates the webserver signal strength sensor.
    #[must_use]
    pub fn webserver_rssi() -> Self {
        Self::new(EntitySource::WebServer, WEBSERVER_NAME, SensorKind::WifiRssi)
    }

    /// Returns the entity ID, e.g. `sensor.salon_temperature`.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub(crate) fn set_entity_id(&mut self, entity_id: String) {
        self.entity_id = entity_id;
    }

    /// Returns an ID that stays stable when the device is renamed.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source of this sensor.
    #[must_use]
    pub fn source(&self) -> EntitySource {
        self.source
    }

    /// Returns what this sensor measures.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the unit of measurement for the current snapshot.
    #[must_use]
    pub fn unit(&self, snapshot: &Snapshot) -> Option<&'static str> {
        if let Some(unit) = self.kind.fixed_unit() {
            return Some(unit);
        }
        match self.source {
            EntitySource::Zone(key) => snapshot.zone(key).map(|z| z.units.symbol()),
            EntitySource::HotWater => snapshot.hot_water().map(|d| d.units.symbol()),
            EntitySource::WebServer => None,
        }
    }

    /// Computes the state of this sensor.
    ///
    /// The sensor is unavailable when the last poll failed, when its source
    /// is missing from the snapshot, or when the source does not report the
    /// value.
    #[must_use]
    pub fn state(&self, coordinator: &CoordinatorState) -> EntityState {
        if !coordinator.is_available() {
            return EntityState::Unavailable;
        }
        self.kind
            .read(self.source, &coordinator.snapshot)
            .map_or(EntityState::Unavailable, EntityState::Value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::response::HvacResponse;
    use crate::state::Health;

    fn state_with(zones: serde_json::Value, available: bool) -> CoordinatorState {
        let hvac: HvacResponse =
            serde_json::from_value(serde_json::json!({ "systems": [{ "data": zones }] })).unwrap();
        CoordinatorState {
            snapshot: Arc::new(Snapshot::builder().zones(&hvac).build()),
            health: if available {
                Health::Healthy
            } else {
                Health::Unavailable
            },
            last_update_success: available,
            last_updated: None,
            last_error: None,
        }
    }

    #[test]
    fn ids_and_names() {
        let sensor = SensorEntity::zone(ZoneKey::new(1, 1), "Salon", SensorKind::Humidity);
        assert_eq!(sensor.entity_id(), "sensor.salon_humidity");
        assert_eq!(sensor.unique_id(), "1:1_humidity");
        assert_eq!(sensor.name(), "Salon Humidity");

        let dhw = SensorEntity::hot_water();
        assert_eq!(dhw.entity_id(), "sensor.airzone_dhw_temperature");
        assert_eq!(dhw.unique_id(), "dhw_temperature");

        let rssi = SensorEntity::webserver_rssi();
        assert_eq!(rssi.entity_id(), "sensor.airzone_webserver_rssi");
    }

    #[test]
    fn temperature_value_formatting() {
        let state = state_with(
            serde_json::json!([{"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6}]),
            true,
        );
        let sensor = SensorEntity::zone(ZoneKey::new(1, 1), "Salon", SensorKind::Temperature);
        assert_eq!(sensor.state(&state), EntityState::value("19.6"));
        assert_eq!(sensor.unit(&state.snapshot), Some("°C"));
    }

    #[test]
    fn missing_zone_is_unavailable() {
        let state = state_with(serde_json::json!([]), true);
        let sensor = SensorEntity::zone(ZoneKey::new(1, 1), "Salon", SensorKind::Temperature);
        assert_eq!(sensor.state(&state), EntityState::Unavailable);
    }

    #[test]
    fn missing_field_is_unavailable() {
        let state = state_with(
            serde_json::json!([{"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6}]),
            true,
        );
        let sensor = SensorEntity::zone(ZoneKey::new(1, 1), "Salon", SensorKind::Humidity);
        assert_eq!(sensor.state(&state), EntityState::Unavailable);
        assert_eq!(sensor.unit(&state.snapshot), Some("%"));
    }

    #[test]
    fn failed_poll_hides_stale_value() {
        let state = state_with(
            serde_json::json!([{"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6}]),
            false,
        );
        let sensor = SensorEntity::zone(ZoneKey::new(1, 1), "Salon", SensorKind::Temperature);
        assert_eq!(sensor.state(&state), EntityState::Unavailable);
    }

    #[test]
    fn kind_does_not_read_foreign_source() {
        let snapshot = Snapshot::default();
        assert_eq!(
            SensorKind::Temperature.read(EntitySource::HotWater, &snapshot),
            None
        );
    }

    #[test]
    fn entity_state_display() {
        assert_eq!(EntityState::value("21.1").to_string(), "21.1");
        assert_eq!(EntityState::Unavailable.to_string(), "unavailable");
        assert_eq!(EntityState::Unavailable.as_value(), None);
    }
}
