// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures and an in-memory Airzone API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use airzone_lib::error::{ApiError, Error, ParseError, ProtocolError, Result};
use airzone_lib::protocol::AirzoneApi;
use airzone_lib::response::{
    HotWater, HvacResponse, SystemsResponse, VersionResponse, WebServerInfo,
};
use parking_lot::Mutex;
use serde_json::json;

/// All zones of the test installation.
pub fn hvac_mock() -> HvacResponse {
    serde_json::from_value(json!({
        "systems": [
            {"data": [
                {"systemID": 1, "zoneID": 1, "name": "Salon", "on": 0, "roomTemp": 19.6,
                 "setpoint": 19.2, "maxTemp": 30, "minTemp": 15, "humidity": 34, "mode": 3,
                 "units": 0, "air_demand": 0, "floor_demand": 0},
                {"systemID": 1, "zoneID": 2, "name": "Dorm Ppal", "on": 1, "roomTemp": 21.1,
                 "setpoint": 19.5, "maxTemp": 30, "minTemp": 15, "humidity": 39, "mode": 3,
                 "units": 0, "air_demand": 1, "floor_demand": 1},
                {"systemID": 1, "zoneID": 3, "name": "Dorm #1", "on": 0, "roomTemp": 20.8,
                 "setpoint": 19.3, "maxTemp": 30, "minTemp": 15, "mode": 3, "units": 0},
                {"systemID": 1, "zoneID": 4, "name": "Despacho", "on": 0, "roomTemp": 21.2,
                 "setpoint": 19.4, "maxTemp": 86, "minTemp": 59, "humidity": 36, "mode": 3,
                 "units": 1}
            ]},
            {"data": [
                {"systemID": 2, "zoneID": 1, "name": "Dkn Plus", "on": 1, "roomTemp": 21.7,
                 "setpoint": 24, "maxTemp": 32, "minTemp": 18, "mode": 7, "units": 0}
            ]}
        ]
    }))
    .unwrap()
}

/// The installation before the other zones were paired.
pub fn hvac_mock_new_zones() -> HvacResponse {
    serde_json::from_value(json!({
        "systems": [
            {"data": [
                {"systemID": 1, "zoneID": 1, "name": "Salon", "on": 0, "roomTemp": 19.6,
                 "setpoint": 19.2, "maxTemp": 30, "minTemp": 15, "humidity": 34, "mode": 3,
                 "units": 0}
            ]}
        ]
    }))
    .unwrap()
}

pub fn dhw_mock() -> HotWater {
    serde_json::from_value(json!({
        "systemID": 0, "acs_temp": 43, "acs_setpoint": 45, "acs_maxtemp": 75,
        "acs_mintemp": 30, "acs_onoff": 1, "acs_power": 0, "units": 0
    }))
    .unwrap()
}

pub fn version_mock() -> VersionResponse {
    VersionResponse {
        version: "1.62".to_string(),
    }
}

pub fn webserver_mock() -> WebServerInfo {
    serde_json::from_value(json!({
        "mac": "11:22:33:44:55:66", "wifi_channel": 6, "wifi_rssi": -42,
        "interface": "wifi", "ws_firmware": "3.44", "ws_type": "ws_az"
    }))
    .unwrap()
}

/// One of the five webserver queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Hvac,
    Dhw,
    Systems,
    Version,
    WebServer,
}

/// A failure below the API level, as the HTTP client would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The connection is refused.
    Unreachable,
    /// The body is not what the query expects.
    Garbled,
}

impl Fault {
    fn to_error(self, query: Query) -> Error {
        match self {
            Self::Unreachable => {
                ProtocolError::ConnectionFailed(format!("{query:?}: connection refused")).into()
            }
            Self::Garbled => {
                ParseError::UnexpectedFormat(format!("{query:?}: response is not JSON")).into()
            }
        }
    }
}

/// In-memory webserver whose answers tests can change between polls.
///
/// Starts with the full HVAC fixture, a working version endpoint, and
/// every optional feature reported as missing. Any query can be slowed
/// down or broken at the transport level.
pub struct MockApi {
    hvac: Mutex<std::result::Result<HvacResponse, ApiError>>,
    dhw: Mutex<std::result::Result<HotWater, ApiError>>,
    systems: Mutex<std::result::Result<SystemsResponse, ApiError>>,
    version: Mutex<std::result::Result<VersionResponse, ApiError>>,
    webserver: Mutex<std::result::Result<WebServerInfo, ApiError>>,
    delays: Mutex<HashMap<Query, Duration>>,
    faults: Mutex<HashMap<Query, Fault>>,
    hvac_calls: AtomicUsize,
}

impl MockApi {
    pub fn new(hvac: HvacResponse) -> Self {
        Self {
            hvac: Mutex::new(Ok(hvac)),
            dhw: Mutex::new(Err(ApiError::HotWaterNotAvailable)),
            systems: Mutex::new(Err(ApiError::SystemOutOfRange)),
            version: Mutex::new(Ok(version_mock())),
            webserver: Mutex::new(Err(ApiError::InvalidMethod)),
            delays: Mutex::new(HashMap::new()),
            faults: Mutex::new(HashMap::new()),
            hvac_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_hvac(&self, hvac: std::result::Result<HvacResponse, ApiError>) {
        *self.hvac.lock() = hvac;
    }

    pub fn set_dhw(&self, dhw: std::result::Result<HotWater, ApiError>) {
        *self.dhw.lock() = dhw;
    }

    pub fn set_webserver(&self, webserver: std::result::Result<WebServerInfo, ApiError>) {
        *self.webserver.lock() = webserver;
    }

    pub fn set_version(&self, version: std::result::Result<VersionResponse, ApiError>) {
        *self.version.lock() = version;
    }

    /// Makes `query` answer only after `delay`, or immediately for `None`.
    pub fn set_delay(&self, query: Query, delay: Option<Duration>) {
        let mut delays = self.delays.lock();
        match delay {
            Some(delay) => delays.insert(query, delay),
            None => delays.remove(&query),
        };
    }

    /// Makes `query` fail below the API level, or answer normally for `None`.
    pub fn set_fault(&self, query: Query, fault: Option<Fault>) {
        let mut faults = self.faults.lock();
        match fault {
            Some(fault) => faults.insert(query, fault),
            None => faults.remove(&query),
        };
    }

    pub fn hvac_calls(&self) -> usize {
        self.hvac_calls.load(Ordering::SeqCst)
    }

    pub fn reset_hvac_calls(&self) {
        self.hvac_calls.store(0, Ordering::SeqCst);
    }

    async fn answer<T: Clone>(
        &self,
        query: Query,
        slot: &Mutex<std::result::Result<T, ApiError>>,
    ) -> Result<T> {
        let delay = self.delays.lock().get(&query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let fault = self.faults.lock().get(&query).copied();
        if let Some(fault) = fault {
            return Err(fault.to_error(query));
        }

        let answer = slot.lock().clone();
        answer.map_err(Into::into)
    }
}

impl AirzoneApi for MockApi {
    async fn get_dhw(&self) -> Result<HotWater> {
        self.answer(Query::Dhw, &self.dhw).await
    }

    async fn get_hvac(&self) -> Result<HvacResponse> {
        self.hvac_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(Query::Hvac, &self.hvac).await
    }

    async fn get_hvac_systems(&self) -> Result<SystemsResponse> {
        self.answer(Query::Systems, &self.systems).await
    }

    async fn get_version(&self) -> Result<VersionResponse> {
        self.answer(Query::Version, &self.version).await
    }

    async fn get_webserver(&self) -> Result<WebServerInfo> {
        self.answer(Query::WebServer, &self.webserver).await
    }
}
