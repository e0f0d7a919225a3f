// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Airzone library.
//!
//! This module provides the error hierarchy used across the library: typed
//! errors reported by the Airzone webserver, transport failures, response
//! parsing, and configuration validation.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The Airzone webserver rejected the request.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A coordinator poll failed because the HVAC query failed.
    #[error("update failed: {0}")]
    UpdateFailed(String),
}

/// Typed errors reported by the Airzone webserver.
///
/// Most of these describe a feature the installation does not have
/// (no hot water, a firmware without the webserver endpoint). They are
/// cheap to clone so that test doubles can hand them out repeatedly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The installation has no domestic hot water module.
    #[error("hot water not available")]
    HotWaterNotAvailable,

    /// The requested system ID does not exist.
    #[error("system ID out of range")]
    SystemOutOfRange,

    /// The requested zone ID does not exist.
    #[error("zone ID out of range")]
    ZoneOutOfRange,

    /// The webserver firmware does not implement the requested method.
    #[error("invalid method")]
    InvalidMethod,

    /// Any other error message returned by the device.
    #[error("device error: {0}")]
    Device(String),
}

impl ApiError {
    /// Returns `true` if the error only means that the queried feature is
    /// absent on this installation.
    #[must_use]
    pub fn is_feature_unavailable(&self) -> bool {
        matches!(
            self,
            Self::HotWaterNotAvailable | Self::SystemOutOfRange | Self::InvalidMethod
        )
    }
}

/// Errors related to HTTP communication with the webserver.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing Airzone responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A polling interval or timeout of zero was given.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The event bus needs room for at least one event.
    #[error("event capacity must be greater than zero")]
    ZeroCapacity,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
