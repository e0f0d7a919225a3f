// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-call setup of coordinator, sensors and polling loop.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::coordinator::{Coordinator, CoordinatorConfig, PollerHandle};
use crate::entity::{EntityState, SensorPlatform};
use crate::error::Result;
use crate::event::CoordinatorEvent;
use crate::protocol::AirzoneApi;
use crate::state::CoordinatorState;

/// A running Airzone integration.
///
/// Setup performs the first poll before anything else; if it fails, setup
/// fails and nothing keeps running. Afterwards the integration polls every
/// scan interval until it is shut down or dropped.
///
/// # Examples
///
/// ```no_run
/// use airzone_lib::AirzoneIntegration;
/// use airzone_lib::coordinator::CoordinatorConfig;
/// use airzone_lib::protocol::HttpConfig;
///
/// # async fn example() -> airzone_lib::Result<()> {
/// let integration =
///     AirzoneIntegration::connect(HttpConfig::new("192.168.1.25"), CoordinatorConfig::default())
///         .await?;
///
/// for entity_id in integration.sensors().entity_ids() {
///     println!("{entity_id}: {:?}", integration.state(&entity_id));
/// }
///
/// integration.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct AirzoneIntegration<A> {
    coordinator: Arc<Coordinator<A>>,
    sensors: Arc<SensorPlatform>,
    poller: PollerHandle,
}

impl<A: AirzoneApi + 'static> AirzoneIntegration<A> {
    /// Sets up the integration on top of an API client.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid configuration and
    /// `Error::UpdateFailed` if the first poll fails.
    pub async fn setup(api: A, config: CoordinatorConfig) -> Result<Self> {
        let coordinator = Arc::new(Coordinator::new(api, config)?);
        let sensors = Arc::new(SensorPlatform::new());
        sensors.attach(&*coordinator);

        coordinator.refresh().await?;

        tracing::info!(
            zones = coordinator.snapshot().zones().len(),
            sensors = sensors.len(),
            "Airzone integration set up"
        );

        let poller = PollerHandle::spawn(Arc::clone(&coordinator));

        Ok(Self {
            coordinator,
            sensors,
            poller,
        })
    }

    /// Returns the coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<Coordinator<A>> {
        &self.coordinator
    }

    /// Returns the sensor platform.
    #[must_use]
    pub fn sensors(&self) -> &Arc<SensorPlatform> {
        &self.sensors
    }

    /// Returns the state of a sensor, or `None` if it does not exist.
    #[must_use]
    pub fn state(&self, entity_id: &str) -> Option<EntityState> {
        self.sensors.state(entity_id)
    }

    /// Returns the coordinator's current state.
    #[must_use]
    pub fn coordinator_state(&self) -> CoordinatorState {
        self.coordinator.state()
    }

    /// Subscribes to coordinator events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.coordinator.subscribe()
    }

    /// Asks the polling loop to poll now.
    pub fn request_refresh(&self) {
        self.coordinator.request_refresh();
    }

    /// Stops polling.
    pub async fn shutdown(self) {
        self.poller.shutdown().await;
        tracing::debug!("Airzone integration shut down");
    }
}

impl<A> std::fmt::Debug for AirzoneIntegration<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirzoneIntegration")
            .field("coordinator", &self.coordinator)
            .field("sensors", &self.sensors.len())
            .field("poller", &self.poller)
            .finish()
    }
}

#[cfg(feature = "http")]
impl AirzoneIntegration<crate::protocol::HttpClient> {
    /// Sets up the integration against a webserver over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or setup fails.
    pub async fn connect(
        http: crate::protocol::HttpConfig,
        config: CoordinatorConfig,
    ) -> Result<Self> {
        let client = http.into_client()?;
        Self::setup(client, config).await
    }
}
