// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode and unit types reported by the webserver.
//!
//! The local API encodes both as small integers. Unknown codes are kept
//! rather than rejected so that newer firmware does not break parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HVAC operating mode of a system.
///
/// # Examples
///
/// ```
/// use airzone_lib::types::HvacMode;
///
/// assert_eq!(HvacMode::from(3), HvacMode::Heating);
/// assert_eq!(HvacMode::from(42), HvacMode::Unknown(42));
/// assert_eq!(u8::from(HvacMode::Cooling), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum HvacMode {
    /// System stopped.
    Stop,
    /// Cooling.
    Cooling,
    /// Heating.
    Heating,
    /// Ventilation only.
    Fan,
    /// Dehumidification.
    Dry,
    /// Automatic heat/cool.
    Auto,
    /// A mode code this library does not know.
    Unknown(u8),
}

impl HvacMode {
    /// Returns a lowercase name suitable for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Cooling => "cooling",
            Self::Heating => "heating",
            Self::Fan => "fan",
            Self::Dry => "dry",
            Self::Auto => "auto",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for HvacMode {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Stop,
            2 => Self::Cooling,
            3 => Self::Heating,
            4 => Self::Fan,
            5 => Self::Dry,
            7 => Self::Auto,
            other => Self::Unknown(other),
        }
    }
}

impl From<HvacMode> for u8 {
    fn from(mode: HvacMode) -> Self {
        match mode {
            HvacMode::Stop => 1,
            HvacMode::Cooling => 2,
            HvacMode::Heating => 3,
            HvacMode::Fan => 4,
            HvacMode::Dry => 5,
            HvacMode::Auto => 7,
            HvacMode::Unknown(code) => code,
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperature unit used by a zone or the hot water module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TemperatureUnit {
    /// Degrees Celsius (code 0).
    #[default]
    Celsius,
    /// Degrees Fahrenheit (code 1).
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl From<u8> for TemperatureUnit {
    fn from(code: u8) -> Self {
        if code == 1 {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }
}

impl From<TemperatureUnit> for u8 {
    fn from(unit: TemperatureUnit) -> Self {
        match unit {
            TemperatureUnit::Celsius => 0,
            TemperatureUnit::Fahrenheit => 1,
        }
    }
}
