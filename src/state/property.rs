// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-facing device properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A property callers can refresh, set and link for polling.
///
/// Ordering follows declaration order, which is also the order in which
/// linked properties are polled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    /// On/off view of the mode.
    Switch,
    /// Brightness percentage.
    Brightness,
    /// LED mode.
    Mode,
    /// Current effect index.
    CurrentEffect,
    /// Current movie id.
    CurrentMovie,
}

impl Property {
    /// Every property.
    pub const ALL: [Self; 5] = [
        Self::Switch,
        Self::Brightness,
        Self::Mode,
        Self::CurrentEffect,
        Self::CurrentMovie,
    ];

    /// Returns the property identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Brightness => "brightness",
            Self::Mode => "mode",
            Self::CurrentEffect => "current-effect",
            Self::CurrentMovie => "current-movie",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "dimmer" is the historical name of the brightness property.
        match s {
            "dimmer" => Ok(Self::Brightness),
            _ => Self::ALL
                .into_iter()
                .find(|p| p.as_str() == s)
                .ok_or_else(|| ValueError::InvalidProperty(s.to_string())),
        }
    }
}
