// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of the last published device values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DeviceStatus, StateChange};
use crate::types::{Brightness, LedMode, PowerState};

/// Latest known values of every property plus the device status.
///
/// A property stays `None` until it is first refreshed or set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    power: Option<PowerState>,
    brightness: Option<Brightness>,
    mode: Option<LedMode>,
    current_effect: Option<u32>,
    current_movie: Option<u32>,
    status: DeviceStatus,
    last_updated: Option<DateTime<Utc>>,
}

impl DeviceState {
    /// Creates an empty state with unknown status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a change and returns `true` if a value actually changed.
    ///
    /// The update timestamp is refreshed either way.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        self.last_updated = Some(Utc::now());
        match change {
            StateChange::Power(power) => replace(&mut self.power, *power),
            StateChange::Brightness(brightness) => replace(&mut self.brightness, *brightness),
            StateChange::Mode(mode) => replace(&mut self.mode, *mode),
            StateChange::CurrentEffect(index) => replace(&mut self.current_effect, *index),
            StateChange::CurrentMovie(id) => replace(&mut self.current_movie, *id),
        }
    }

    /// Sets the status and returns `true` if it changed.
    pub fn set_status(&mut self, status: DeviceStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns the brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Returns the mode.
    #[must_use]
    pub fn mode(&self) -> Option<LedMode> {
        self.mode
    }

    /// Returns the current effect index.
    #[must_use]
    pub fn current_effect(&self) -> Option<u32> {
        self.current_effect
    }

    /// Returns the current movie id.
    #[must_use]
    pub fn current_movie(&self) -> Option<u32> {
        self.current_movie
    }

    /// Returns the device status.
    #[must_use]
    pub fn status(&self) -> &DeviceStatus {
        &self.status
    }

    /// Returns when a value was last published.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

fn replace<V: PartialEq>(slot: &mut Option<V>, value: V) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}
