// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the Airzone local API.
//!
//! This module provides structures for deserializing the JSON bodies
//! returned by the webserver. Each response type corresponds to one query
//! of [`AirzoneApi`](crate::protocol::AirzoneApi).

mod dhw;
mod hvac;
mod system;
mod version;

pub use dhw::{DhwResponse, HotWater};
pub use hvac::{HvacResponse, HvacSystemZones, Zone};
pub use system::{SystemInfo, SystemsResponse};
pub use version::{VersionResponse, WebServerInfo};

/// The webserver encodes flags as `0`/`1` integers; some firmware sends
/// JSON booleans instead.
pub(crate) mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => value,
            Flag::Number(value) => value != 0.0,
        })
    }
}

/// Percentages reported as integers or decimals, rounded and clamped to
/// `0..=100`.
pub(crate) mod percent {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?
            .filter(|value| value.is_finite())
            .map(|value| value.round().clamp(0.0, 100.0) as u8))
    }
}
