// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::DEFAULT_CHANNEL_CAPACITY;

/// Configuration for a [`Coordinator`](super::Coordinator).
///
/// Durations are expressed in seconds when (de)serialized; fractions of
/// a second are kept.
///
/// # Examples
///
/// ```
/// use airzone_lib::coordinator::CoordinatorConfig;
/// use std::time::Duration;
///
/// let config = CoordinatorConfig::default()
///     .with_scan_interval(Duration::from_secs(30));
/// assert_eq!(config.scan_interval(), Duration::from_secs(30));
///
/// let config: CoordinatorConfig =
///     serde_json::from_str(r#"{"scan_interval": 15}"#).unwrap();
/// assert_eq!(config.scan_interval(), Duration::from_secs(15));
/// assert_eq!(config.request_timeout(), CoordinatorConfig::DEFAULT_REQUEST_TIMEOUT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    #[serde(with = "duration_secs")]
    scan_interval: Duration,
    #[serde(with = "duration_secs")]
    request_timeout: Duration,
    event_capacity: usize,
}

impl CoordinatorConfig {
    /// Default time between two polls.
    pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(60);
    /// Default upper bound for one poll.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Sets the time between two polls.
    #[must_use]
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Sets the upper bound for one poll.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets how many events the event bus buffers per subscriber.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Returns the time between two polls.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Returns the upper bound for one poll.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the event bus capacity.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a duration or the event capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("scan interval"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("request timeout"));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            scan_interval: Self::DEFAULT_SCAN_INTERVAL,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Durations as (possibly fractional) seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() == 0 {
            serializer.serialize_u64(value.as_secs())
        } else {
            serializer.serialize_f64(value.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
