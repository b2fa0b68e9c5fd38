// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED mode and power types.
//!
//! The device only knows about modes; "power" is a simplified view where
//! every mode other than `off` counts as on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Operating mode of the LED output.
///
/// # Examples
///
/// ```
/// use twinkly_lib::types::LedMode;
///
/// let mode: LedMode = "movie".parse().unwrap();
/// assert_eq!(mode, LedMode::Movie);
/// assert_eq!(mode.as_str(), "movie");
/// assert!(mode.is_on());
///
/// assert!("disco".parse::<LedMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedMode {
    /// LEDs are switched off.
    Off,
    /// Static color.
    Color,
    /// Built-in demo sequence.
    Demo,
    /// Built-in effect.
    Effect,
    /// Uploaded movie.
    Movie,
    /// Playlist of movies.
    Playlist,
    /// Real-time frames streamed by a client.
    Rt,
}

impl LedMode {
    /// Every mode the device accepts.
    pub const ALL: [Self; 7] = [
        Self::Off,
        Self::Color,
        Self::Demo,
        Self::Effect,
        Self::Movie,
        Self::Playlist,
        Self::Rt,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Color => "color",
            Self::Demo => "demo",
            Self::Effect => "effect",
            Self::Movie => "movie",
            Self::Playlist => "playlist",
            Self::Rt => "rt",
        }
    }

    /// Returns `true` for every mode except [`LedMode::Off`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Returns the power view of this mode.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        if self.is_on() {
            PowerState::On
        } else {
            PowerState::Off
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lowered)
            .ok_or_else(|| ValueError::InvalidMode(s.to_string()))
    }
}

/// Simplified on/off state of the device.
///
/// # Examples
///
/// ```
/// use twinkly_lib::types::{LedMode, PowerState};
///
/// assert_eq!(PowerState::On.target_mode(), LedMode::Movie);
/// assert_eq!(PowerState::Off.target_mode(), LedMode::Off);
/// assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerState {
    /// Mode is `off`.
    Off,
    /// Mode is anything but `off`.
    On,
}

impl PowerState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the mode selected when this power state is requested.
    ///
    /// Switching on resumes the uploaded movie.
    #[must_use]
    pub const fn target_mode(&self) -> LedMode {
        match self {
            Self::Off => LedMode::Off,
            Self::On => LedMode::Movie,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
