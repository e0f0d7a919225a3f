// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor platform: creates sensors and keeps their states current.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::state::{CoordinatorState, Snapshot};
use crate::subscription::{Listenable, SubscriptionId};

use super::{EntitySource, EntityState, SensorEntity, SensorKind};

/// Owns every sensor entity and its latest state.
///
/// Attached to a coordinator, the platform reacts to each poll by first
/// creating sensors for sources it has not seen before (new zones, a hot
/// water tank, a webserver) and then recomputing the state of every sensor.
/// Sensors are never removed: a zone that disappears leaves its sensors
/// unavailable.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use airzone_lib::coordinator::{Coordinator, CoordinatorConfig};
/// use airzone_lib::entity::SensorPlatform;
/// use airzone_lib::protocol::HttpConfig;
///
/// # async fn example() -> airzone_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.25").into_client()?;
/// let coordinator = Coordinator::new(client, CoordinatorConfig::default())?;
/// let sensors = Arc::new(SensorPlatform::new());
/// sensors.attach(&coordinator);
///
/// coordinator.refresh().await?;
/// println!("{:?}", sensors.state("sensor.salon_temperature"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SensorPlatform {
    inner: RwLock<PlatformInner>,
}

#[derive(Debug, Default)]
struct PlatformInner {
    /// Sensors keyed by entity ID.
    entities: BTreeMap<String, SensorEntity>,
    /// Sources and kinds that already have a sensor.
    known: HashSet<(EntitySource, SensorKind)>,
    /// Latest state per entity ID.
    states: BTreeMap<String, EntityState>,
}

impl SensorPlatform {
    /// Creates an empty platform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this platform to a coordinator's updates.
    pub fn attach<L: Listenable>(self: &Arc<Self>, source: &L) -> SubscriptionId {
        let platform = Arc::clone(self);
        source.add_listener(move |state| platform.handle_update(state))
    }

    /// Processes one coordinator update.
    pub fn handle_update(&self, state: &CoordinatorState) {
        let mut inner = self.inner.write();

        for entity in discover(&state.snapshot) {
            inner.add(entity);
        }

        let PlatformInner {
            entities, states, ..
        } = &mut *inner;
        for (entity_id, entity) in entities.iter() {
            let new_state = entity.state(state);
            if states.get(entity_id) != Some(&new_state) {
                tracing::trace!(entity_id = %entity_id, state = %new_state, "Sensor state changed");
            }
            states.insert(entity_id.clone(), new_state);
        }
    }

    /// Returns the state of an entity, or `None` if no such entity exists.
    #[must_use]
    pub fn state(&self, entity_id: &str) -> Option<EntityState> {
        self.inner.read().states.get(entity_id).cloned()
    }

    /// Returns an entity by ID.
    #[must_use]
    pub fn entity(&self, entity_id: &str) -> Option<SensorEntity> {
        self.inner.read().entities.get(entity_id).cloned()
    }

    /// Returns all entity IDs in sorted order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<String> {
        self.inner.read().entities.keys().cloned().collect()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entities.len()
    }

    /// Returns `true` if no entity has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlatformInner {
    fn add(&mut self, mut entity: SensorEntity) {
        if !self.known.insert((entity.source(), entity.kind())) {
            return;
        }

        // Two zones may share a name; later ones get a numeric suffix.
        let base = entity.entity_id().to_string();
        let mut candidate = base.clone();
        let mut n = 2;
        while self.entities.contains_key(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        entity.set_entity_id(candidate.clone());

        tracing::debug!(entity_id = %candidate, source = %entity.source(), "Adding sensor");
        self.entities.insert(candidate, entity);
    }
}

/// Lists the sensors the snapshot supports.
fn discover(snapshot: &Snapshot) -> Vec<SensorEntity> {
    let mut found = Vec::new();

    for (key, zone) in snapshot.zones() {
        for kind in SensorKind::ZONE_KINDS {
            if kind.read(EntitySource::Zone(*key), snapshot).is_some() {
                found.push(SensorEntity::zone(*key, &zone.name, kind));
            }
        }
    }

    if snapshot.hot_water().is_some_and(|dhw| dhw.temp.is_some()) {
        found.push(SensorEntity::hot_water());
    }

    if snapshot
        .webserver()
        .is_some_and(|ws| ws.wifi_rssi.is_some())
    {
        found.push(SensorEntity::webserver_rssi());
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{HotWater, HvacResponse};
    use crate::state::Health;

    fn healthy(snapshot: Snapshot) -> CoordinatorState {
        CoordinatorState {
            snapshot: Arc::new(snapshot),
            health: Health::Healthy,
            last_update_success: true,
            last_updated: None,
            last_error: None,
        }
    }

    fn zones(zones: serde_json::Value) -> Snapshot {
        let hvac: HvacResponse =
            serde_json::from_value(serde_json::json!({ "systems": [{ "data": zones }] })).unwrap();
        Snapshot::builder().zones(&hvac).build()
    }

    #[test]
    fn creates_sensors_for_reported_fields() {
        let platform = SensorPlatform::new();
        platform.handle_update(&healthy(zones(serde_json::json!([
            {"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6, "humidity": 34},
            {"systemID": 1, "zoneID": 2, "name": "Dorm Ppal", "roomTemp": 21.1}
        ]))));

        assert_eq!(
            platform.entity_ids(),
            vec![
                "sensor.dorm_ppal_temperature",
                "sensor.salon_humidity",
                "sensor.salon_temperature",
            ]
        );
        assert_eq!(
            platform.state("sensor.salon_humidity"),
            Some(EntityState::value("34"))
        );
        assert_eq!(platform.state("sensor.dorm_ppal_humidity"), None);
    }

    #[test]
    fn duplicate_names_get_suffix() {
        let platform = SensorPlatform::new();
        platform.handle_update(&healthy(zones(serde_json::json!([
            {"systemID": 1, "zoneID": 1, "name": "Zona", "roomTemp": 19.0},
            {"systemID": 2, "zoneID": 1, "name": "Zona", "roomTemp": 22.5}
        ]))));

        assert_eq!(
            platform.state("sensor.zona_temperature"),
            Some(EntityState::value("19"))
        );
        assert_eq!(
            platform.state("sensor.zona_temperature_2"),
            Some(EntityState::value("22.5"))
        );
    }

    #[test]
    fn repeated_updates_do_not_duplicate() {
        let platform = SensorPlatform::new();
        let state = healthy(zones(serde_json::json!([
            {"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6}
        ])));

        platform.handle_update(&state);
        platform.handle_update(&state);

        assert_eq!(platform.len(), 1);
    }

    #[test]
    fn hot_water_sensor_follows_section() {
        let platform = SensorPlatform::new();
        let dhw: HotWater = serde_json::from_value(serde_json::json!({"acs_temp": 43})).unwrap();

        platform.handle_update(&healthy(Snapshot::builder().hot_water(Some(dhw)).build()));
        assert_eq!(
            platform.state("sensor.airzone_dhw_temperature"),
            Some(EntityState::value("43"))
        );

        platform.handle_update(&healthy(Snapshot::default()));
        assert_eq!(
            platform.state("sensor.airzone_dhw_temperature"),
            Some(EntityState::Unavailable)
        );
    }

    #[test]
    fn empty_platform() {
        let platform = SensorPlatform::new();
        assert!(platform.is_empty());
        assert!(platform.entity("sensor.salon_temperature").is_none());
    }
}
