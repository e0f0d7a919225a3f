// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, Notify, broadcast, watch};
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, ProtocolError, Result};
use crate::event::{CoordinatorEvent, EventBus};
use crate::protocol::AirzoneApi;
use crate::state::{CoordinatorState, Health, Snapshot};
use crate::subscription::{Listenable, ListenerRegistry, SubscriptionId};

use super::CoordinatorConfig;

/// Polls an [`AirzoneApi`] and publishes the merged result.
///
/// Each poll runs all queries concurrently. Only the HVAC query decides
/// the outcome: when it fails the poll fails, the previous snapshot is
/// kept but marked unusable, and the coordinator turns
/// [`Health::Unavailable`]. Failures of the other queries only drop their
/// section from the new snapshot.
///
/// After every poll, successful or not, the new [`CoordinatorState`] is
/// stored, listeners are called and an event is published.
///
/// # Examples
///
/// ```no_run
/// use airzone_lib::coordinator::{Coordinator, CoordinatorConfig};
/// use airzone_lib::protocol::HttpConfig;
///
/// # async fn example() -> airzone_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.25").into_client()?;
/// let coordinator = Coordinator::new(client, CoordinatorConfig::default())?;
///
/// let snapshot = coordinator.refresh().await?;
/// for (key, zone) in snapshot.zones() {
///     println!("{key} {}: {:?}", zone.name, zone.room_temp);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Coordinator<A> {
    api: A,
    config: CoordinatorConfig,
    state_tx: watch::Sender<CoordinatorState>,
    listeners: ListenerRegistry,
    event_bus: EventBus,
    /// Serialises polls so that overlapping refreshes cannot interleave.
    refresh_lock: Mutex<()>,
    refresh_requested: Notify,
}

impl<A: AirzoneApi> Coordinator<A> {
    /// Creates a coordinator. No poll is performed until
    /// [`refresh`](Self::refresh) or [`run`](Self::run) is called.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn new(api: A, config: CoordinatorConfig) -> Result<Self> {
        config.validate()?;

        let (state_tx, _) = watch::channel(CoordinatorState::default());

        Ok(Self {
            api,
            event_bus: EventBus::with_capacity(config.event_capacity()),
            config,
            state_tx,
            listeners: ListenerRegistry::new(),
            refresh_lock: Mutex::new(()),
            refresh_requested: Notify::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        self.state_tx.borrow().clone()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state_tx.borrow().snapshot)
    }

    /// Returns the current health.
    #[must_use]
    pub fn health(&self) -> Health {
        self.state_tx.borrow().health
    }

    /// Returns a receiver that always holds the latest state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<CoordinatorState> {
        self.state_tx.subscribe()
    }

    /// Subscribes to coordinator events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.event_bus.subscribe()
    }

    /// Asks the polling loop to poll now.
    ///
    /// Requests made while a poll is running are remembered and served
    /// right after it. Has no effect if [`run`](Self::run) is not active.
    pub fn request_refresh(&self) {
        self.refresh_requested.notify_one();
    }

    /// Polls the webserver once and publishes the result.
    ///
    /// Each query is bounded by the configured request timeout on its own;
    /// a secondary query that runs out of time is dropped like any other
    /// secondary failure.
    ///
    /// # Errors
    ///
    /// Returns `Error::UpdateFailed` if the HVAC query failed or exceeded
    /// the request timeout. Listeners are notified in that case too.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let _guard = self.refresh_lock.lock().await;

        match self.fetch().await {
            Ok(snapshot) => Ok(self.publish_success(snapshot)),
            Err(e) => Err(self.publish_failure(&e)),
        }
    }

    /// Runs the polling loop until the task is dropped or aborted.
    ///
    /// The first poll happens one scan interval from now; a
    /// [`request_refresh`](Self::request_refresh) polls immediately and
    /// restarts the interval.
    pub async fn run(&self) {
        self.run_from(Instant::now() + self.config.scan_interval()).await;
    }

    pub(crate) async fn run_from(&self, start: Instant) {
        let period = self.config.scan_interval();
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(interval_secs = period.as_secs(), "Starting Airzone polling loop");

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                () = self.refresh_requested.notified() => {
                    tracing::debug!("Manual refresh requested");
                    interval.reset();
                }
            }

            // Failures are published to listeners; the loop just keeps going.
            let _ = self.refresh().await;
        }
    }

    async fn fetch(&self) -> Result<Snapshot> {
        let (hvac, dhw, systems, version, webserver) = tokio::join!(
            self.bounded(self.api.get_hvac()),
            self.bounded(self.api.get_dhw()),
            self.bounded(self.api.get_hvac_systems()),
            self.bounded(self.api.get_version()),
            self.bounded(self.api.get_webserver()),
        );

        let hvac = hvac?;

        Ok(Snapshot::builder()
            .zones(&hvac)
            .hot_water(secondary("hot water", dhw))
            .systems(secondary("systems", systems))
            .version(secondary("version", version).map(|v| v.version))
            .webserver(secondary("webserver", webserver))
            .build())
    }

    /// Runs one query under the request timeout.
    async fn bounded<T>(&self, query: impl Future<Output = Result<T>>) -> Result<T> {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, query).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                Err(ProtocolError::Timeout(millis).into())
            }
        }
    }

    fn publish_success(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let previous = self.state();
        let diff = snapshot.diff(&previous.snapshot);
        let snapshot = Arc::new(snapshot);

        tracing::debug!(
            zones = snapshot.zones().len(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Airzone poll succeeded"
        );
        if !diff.added.is_empty() {
            tracing::info!(zones = ?diff.added, "New Airzone zones discovered");
        }
        if !diff.removed.is_empty() {
            tracing::info!(zones = ?diff.removed, "Airzone zones no longer reported");
        }

        let state = CoordinatorState {
            snapshot: Arc::clone(&snapshot),
            health: Health::Healthy,
            last_update_success: true,
            last_updated: Some(Utc::now()),
            last_error: None,
        };
        self.state_tx.send_replace(state.clone());

        if previous.health != Health::Healthy {
            if previous.last_error.is_some() {
                tracing::info!("Airzone webserver is back online");
            }
            self.notify_health(Health::Healthy);
        }

        self.listeners.dispatch_update(&state);
        self.event_bus
            .publish(CoordinatorEvent::refreshed(Arc::clone(&snapshot), diff));

        snapshot
    }

    fn publish_failure(&self, error: &Error) -> Error {
        let previous = self.state();
        let message = format!("error communicating with Airzone webserver: {error}");

        if previous.health == Health::Healthy {
            tracing::warn!(error = %error, "Airzone webserver is unavailable");
        } else {
            tracing::debug!(error = %error, "Airzone poll failed");
        }

        let state = CoordinatorState {
            snapshot: previous.snapshot,
            health: Health::Unavailable,
            last_update_success: false,
            last_updated: previous.last_updated,
            last_error: Some(message.clone()),
        };
        self.state_tx.send_replace(state.clone());

        if previous.health != Health::Unavailable {
            self.notify_health(Health::Unavailable);
        }

        self.listeners.dispatch_update(&state);
        self.event_bus
            .publish(CoordinatorEvent::refresh_failed(message.clone()));

        Error::UpdateFailed(message)
    }

    fn notify_health(&self, health: Health) {
        self.listeners.dispatch_health(health);
        self.event_bus
            .publish(CoordinatorEvent::HealthChanged { health });
    }
}

impl<A: AirzoneApi> Listenable for Coordinator<A> {
    fn add_listener<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CoordinatorState) + Send + Sync + 'static,
    {
        self.listeners.on_update(callback)
    }

    fn on_health_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Health) + Send + Sync + 'static,
    {
        self.listeners.on_health_changed(callback)
    }

    fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.listeners.remove_listener(id)
    }
}

impl<A> std::fmt::Debug for Coordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("health", &self.state_tx.borrow().health)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

/// Keeps the value of a secondary query, dropping it on failure.
fn secondary<T>(query: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(Error::Api(e)) if e.is_feature_unavailable() => {
            tracing::debug!(query, error = %e, "Airzone feature not available");
            None
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "Airzone query failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ApiError;
    use crate::response::{
        HotWater, HvacResponse, SystemsResponse, VersionResponse, WebServerInfo, Zone,
    };
    use crate::types::ZoneKey;

    /// Serves fixed zones; everything else reports the feature as missing.
    struct ZonesOnly {
        zones: parking_lot::Mutex<Option<Vec<Zone>>>,
        hvac_calls: AtomicUsize,
    }

    impl ZonesOnly {
        fn new(zones: Option<Vec<Zone>>) -> Self {
            Self {
                zones: parking_lot::Mutex::new(zones),
                hvac_calls: AtomicUsize::new(0),
            }
        }
    }

    impl AirzoneApi for ZonesOnly {
        async fn get_dhw(&self) -> Result<HotWater> {
            Err(ApiError::HotWaterNotAvailable.into())
        }

        async fn get_hvac(&self) -> Result<HvacResponse> {
            self.hvac_calls.fetch_add(1, Ordering::SeqCst);
            self.zones
                .lock()
                .clone()
                .map(HvacResponse::single_system)
                .ok_or_else(|| ApiError::Device("boom".to_string()).into())
        }

        async fn get_hvac_systems(&self) -> Result<SystemsResponse> {
            Err(ApiError::SystemOutOfRange.into())
        }

        async fn get_version(&self) -> Result<VersionResponse> {
            Ok(VersionResponse {
                version: "1.62".to_string(),
            })
        }

        async fn get_webserver(&self) -> Result<WebServerInfo> {
            Err(ApiError::InvalidMethod.into())
        }
    }

    fn zone(zone_id: u32, temp: f64) -> Zone {
        serde_json::from_value(serde_json::json!({
            "systemID": 1, "zoneID": zone_id,
            "name": format!("Zone {zone_id}"), "roomTemp": temp
        }))
        .unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = CoordinatorConfig::default().with_event_capacity(0);
        let result = Coordinator::new(ZonesOnly::new(None), config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn refresh_merges_available_sections() {
        let api = ZonesOnly::new(Some(vec![zone(1, 20.5)]));
        let coordinator = Coordinator::new(api, CoordinatorConfig::default()).unwrap();

        let snapshot = coordinator.refresh().await.unwrap();

        assert_eq!(snapshot.zone(ZoneKey::new(1, 1)).unwrap().room_temp, Some(20.5));
        assert_eq!(snapshot.version(), Some("1.62"));
        assert!(snapshot.hot_water().is_none());
        assert!(snapshot.systems().is_none());
        assert!(snapshot.webserver().is_none());
        assert_eq!(coordinator.health(), Health::Healthy);
        assert!(coordinator.state().last_updated.is_some());
    }

    #[tokio::test]
    async fn hvac_failure_keeps_snapshot_but_marks_unavailable() {
        let api = ZonesOnly::new(Some(vec![zone(1, 20.5)]));
        let coordinator = Coordinator::new(api, CoordinatorConfig::default()).unwrap();
        coordinator.refresh().await.unwrap();

        *coordinator.api().zones.lock() = None;
        let err = coordinator.refresh().await.unwrap_err();

        assert!(matches!(err, Error::UpdateFailed(_)));
        let state = coordinator.state();
        assert_eq!(state.health, Health::Unavailable);
        assert!(!state.is_available());
        assert!(state.last_error.unwrap().contains("boom"));
        assert_eq!(state.snapshot.zones().len(), 1);
        assert_eq!(coordinator.api().hvac_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn health_listeners_see_each_transition_once() {
        let api = ZonesOnly::new(Some(vec![zone(1, 20.5)]));
        let coordinator = Coordinator::new(api, CoordinatorConfig::default()).unwrap();
        let transitions = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen = Arc::clone(&transitions);
        coordinator.on_health_changed(move |health| seen.lock().push(health));

        coordinator.refresh().await.unwrap();
        coordinator.refresh().await.unwrap();
        *coordinator.api().zones.lock() = None;
        let _ = coordinator.refresh().await;
        let _ = coordinator.refresh().await;

        assert_eq!(
            *transitions.lock(),
            vec![Health::Healthy, Health::Unavailable]
        );
    }

    #[tokio::test]
    async fn watch_receives_latest_state() {
        let api = ZonesOnly::new(Some(vec![zone(2, 18.0)]));
        let coordinator = Coordinator::new(api, CoordinatorConfig::default()).unwrap();
        let mut rx = coordinator.watch();

        coordinator.refresh().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_available());
    }
}
