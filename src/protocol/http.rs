// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the Airzone local API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{ApiError, Error, ParseError, ProtocolError, Result};
use crate::protocol::AirzoneApi;
use crate::response::{
    DhwResponse, HotWater, HvacResponse, SystemsResponse, VersionResponse, WebServerInfo,
};

const HVAC_PATH: &str = "/api/v1/hvac";
const VERSION_PATH: &str = "/api/v1/version";
const WEBSERVER_PATH: &str = "/api/v1/webserver";

/// System ID addressing every system at once.
const SYSTEM_ID_ALL: u32 = 0;
/// System ID addressing the system list.
const SYSTEM_ID_SYSTEMS: u32 = 127;
/// Zone ID addressing every zone at once.
const ZONE_ID_ALL: u32 = 0;

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for an Airzone webserver.
///
/// # Examples
///
/// ```
/// use airzone_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.25")
///     .with_port(3001)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.25:3001");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default local API port.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host.
    ///
    /// The host may carry an `http://` prefix, which is stripped.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host
            .strip_prefix("http://")
            .map_or_else(|| host.clone(), str::to_string);
        Self {
            host,
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<HttpClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for an Airzone webserver.
///
/// Every query is a `POST` with a small JSON body; the webserver answers
/// with JSON, or with an `errors` array when the request cannot be served.
///
/// # Examples
///
/// ```no_run
/// use airzone_lib::protocol::{AirzoneApi, HttpConfig};
///
/// # async fn example() -> airzone_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.25").into_client()?;
/// let hvac = client.get_hvac().await?;
/// for zone in hvac.zones() {
///     println!("{}: {:?}", zone.name, zone.room_temp);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> std::result::Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the webserver.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, body = %body, "Sending Airzone request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = status.as_u16(), body = %text, "Received Airzone response");

        let value: Option<Value> = serde_json::from_str(&text).ok();

        if let Some(api_error) = value.as_ref().and_then(api_error_from_body) {
            return Err(api_error.into());
        }

        if matches!(
            status,
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
        ) {
            return Err(ApiError::InvalidMethod.into());
        }

        if !status.is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let value = value.ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("response from {path} is not JSON"))
        })?;

        serde_json::from_value(value).map_err(|e| Error::Parse(ParseError::Json(e)))
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis).into()
        } else {
            ProtocolError::Http(error).into()
        }
    }
}

impl AirzoneApi for HttpClient {
    async fn get_dhw(&self) -> Result<HotWater> {
        let response: DhwResponse = self
            .post(HVAC_PATH, json!({ "systemID": SYSTEM_ID_ALL }))
            .await?;
        Ok(response.data)
    }

    async fn get_hvac(&self) -> Result<HvacResponse> {
        self.post(
            HVAC_PATH,
            json!({ "systemID": SYSTEM_ID_ALL, "zoneID": ZONE_ID_ALL }),
        )
        .await
    }

    async fn get_hvac_systems(&self) -> Result<SystemsResponse> {
        self.post(HVAC_PATH, json!({ "systemID": SYSTEM_ID_SYSTEMS }))
            .await
    }

    async fn get_version(&self) -> Result<VersionResponse> {
        self.post(VERSION_PATH, json!({})).await
    }

    async fn get_webserver(&self) -> Result<WebServerInfo> {
        self.post(WEBSERVER_PATH, json!({})).await
    }
}

/// Maps an `{"errors": [{"<field>": "<message>"}]}` body to a typed error.
///
/// Returns `None` when the body carries no errors.
fn api_error_from_body(body: &Value) -> Option<ApiError> {
    let first = body.get("errors")?.as_array()?.first()?;
    let (field, message) = first.as_object()?.iter().next()?;
    let message = message.as_str().unwrap_or_default().to_lowercase();

    let error = if message.contains("out of range") {
        match field.as_str() {
            "systemID" => ApiError::SystemOutOfRange,
            "zoneID" => ApiError::ZoneOutOfRange,
            _ => ApiError::Device(format!("{field}: {message}")),
        }
    } else if message.contains("hot water not connected") {
        ApiError::HotWaterNotAvailable
    } else if message.contains("method not supported") || message.contains("method not provided")
    {
        ApiError::InvalidMethod
    } else {
        ApiError::Device(format!("{field}: {message}"))
    };

    Some(error)
}
