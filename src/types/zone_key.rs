// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Stable identifier of a zone: the system it belongs to plus its zone ID.
///
/// Zone IDs are only unique within one system, so both parts are needed.
/// Keys order by system first, then zone. They serialize as
/// `"<system>:<zone>"` so they can be used as JSON object keys.
///
/// # Examples
///
/// ```
/// use airzone_lib::types::ZoneKey;
///
/// let key = ZoneKey::new(1, 3);
/// assert_eq!(key.to_string(), "1:3");
/// assert!(ZoneKey::new(1, 3) < ZoneKey::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ZoneKey {
    system_id: u32,
    zone_id: u32,
}

impl ZoneKey {
    /// Creates a zone key.
    #[must_use]
    pub const fn new(system_id: u32, zone_id: u32) -> Self {
        Self { system_id, zone_id }
    }

    /// Returns the system ID.
    #[must_use]
    pub const fn system_id(&self) -> u32 {
        self.system_id
    }

    /// Returns the zone ID within its system.
    #[must_use]
    pub const fn zone_id(&self) -> u32 {
        self.zone_id
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.system_id, self.zone_id)
    }
}

impl FromStr for ZoneKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::UnexpectedFormat(format!("invalid zone key: {s}"));
        let (system, zone) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self::new(
            system.parse().map_err(|_| invalid())?,
            zone.parse().map_err(|_| invalid())?,
        ))
    }
}

impl TryFrom<String> for ZoneKey {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneKey> for String {
    fn from(key: ZoneKey) -> Self {
        key.to_string()
    }
}
