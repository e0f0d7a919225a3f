// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merged view of one poll cycle.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::response::{HotWater, HvacResponse, SystemInfo, SystemsResponse, WebServerInfo, Zone};
use crate::types::ZoneKey;

/// Immutable view of the data gathered by one poll.
///
/// A snapshot is built once and never modified; the coordinator replaces
/// it wholesale after each poll. Zones are keyed by [`ZoneKey`], so two
/// snapshots built from identical responses compare equal.
///
/// # Examples
///
/// ```
/// use airzone_lib::response::{HvacResponse, Zone};
/// use airzone_lib::state::Snapshot;
/// use airzone_lib::types::ZoneKey;
///
/// let zone: Zone = serde_json::from_str(
///     r#"{"systemID": 1, "zoneID": 1, "name": "Salon", "roomTemp": 19.6}"#,
/// ).unwrap();
/// let snapshot = Snapshot::builder()
///     .zones(&HvacResponse::single_system(vec![zone]))
///     .build();
///
/// assert_eq!(snapshot.zone(ZoneKey::new(1, 1)).unwrap().name, "Salon");
/// assert!(snapshot.hot_water().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    zones: BTreeMap<ZoneKey, Zone>,
    hot_water: Option<HotWater>,
    systems: Option<BTreeMap<u32, SystemInfo>>,
    version: Option<String>,
    webserver: Option<WebServerInfo>,
}

impl Snapshot {
    /// Creates a builder for a new snapshot.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Returns the zone with the given key.
    #[must_use]
    pub fn zone(&self, key: ZoneKey) -> Option<&Zone> {
        self.zones.get(&key)
    }

    /// Returns all zones, ordered by key.
    #[must_use]
    pub fn zones(&self) -> &BTreeMap<ZoneKey, Zone> {
        &self.zones
    }

    /// Returns the set of zone keys.
    #[must_use]
    pub fn zone_keys(&self) -> BTreeSet<ZoneKey> {
        self.zones.keys().copied().collect()
    }

    /// Returns the hot water reading, if the last poll produced one.
    #[must_use]
    pub fn hot_water(&self) -> Option<&HotWater> {
        self.hot_water.as_ref()
    }

    /// Returns the systems keyed by system ID, if the last poll produced them.
    #[must_use]
    pub fn systems(&self) -> Option<&BTreeMap<u32, SystemInfo>> {
        self.systems.as_ref()
    }

    /// Returns the local API version, if known.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns webserver information, if known.
    #[must_use]
    pub fn webserver(&self) -> Option<&WebServerInfo> {
        self.webserver.as_ref()
    }

    /// Compares the zones of this snapshot with a previous one.
    #[must_use]
    pub fn diff(&self, previous: &Snapshot) -> SnapshotDiff {
        let added = self
            .zones
            .keys()
            .filter(|key| !previous.zones.contains_key(key))
            .copied()
            .collect();
        let removed = previous
            .zones
            .keys()
            .filter(|key| !self.zones.contains_key(key))
            .copied()
            .collect();
        SnapshotDiff { added, removed }
    }
}

/// Builder for [`Snapshot`].
///
/// Sections that are never set stay absent.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Sets the zones from an HVAC response.
    ///
    /// A zone reported twice keeps the last reading.
    #[must_use]
    pub fn zones(mut self, response: &HvacResponse) -> Self {
        self.snapshot.zones = response
            .zones()
            .map(|zone| (zone.key(), zone.clone()))
            .collect();
        self
    }

    /// Sets the hot water reading.
    #[must_use]
    pub fn hot_water(mut self, hot_water: Option<HotWater>) -> Self {
        self.snapshot.hot_water = hot_water;
        self
    }

    /// Sets the systems from a system list response.
    #[must_use]
    pub fn systems(mut self, response: Option<SystemsResponse>) -> Self {
        self.snapshot.systems = response.map(|r| {
            r.systems
                .into_iter()
                .map(|system| (system.system_id, system))
                .collect()
        });
        self
    }

    /// Sets the local API version.
    #[must_use]
    pub fn version(mut self, version: Option<String>) -> Self {
        self.snapshot.version = version;
        self
    }

    /// Sets the webserver information.
    #[must_use]
    pub fn webserver(mut self, webserver: Option<WebServerInfo>) -> Self {
        self.snapshot.webserver = webserver;
        self
    }

    /// Finishes the snapshot.
    #[must_use]
    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

/// Zones that appeared or disappeared between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotDiff {
    /// Zones present now but not before.
    pub added: Vec<ZoneKey>,
    /// Zones present before but not now.
    pub removed: Vec<ZoneKey>,
}

impl SnapshotDiff {
    /// Returns `true` if the zone set did not change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
