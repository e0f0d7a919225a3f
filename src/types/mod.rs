// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the wire model, the snapshot and the entities.
//!
//! - [`ZoneKey`] - Stable zone identifier (system ID + zone ID)
//! - [`HvacMode`] - Operating mode of a system
//! - [`TemperatureUnit`] - Celsius or Fahrenheit

mod mode;
mod zone_key;

pub use mode::{HvacMode, TemperatureUnit};
pub use zone_key::ZoneKey;
