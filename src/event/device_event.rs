// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use serde::{Deserialize, Serialize};

use crate::state::{DeviceState, DeviceStatus, Property, StateChange};

/// Something observable happened on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// A property took a new value.
    StateChanged {
        /// The change that was applied.
        change: StateChange,
        /// The complete state after the change.
        new_state: DeviceState,
    },

    /// The device went online or offline.
    StatusChanged {
        /// The new status.
        status: DeviceStatus,
    },
}

impl DeviceEvent {
    /// Returns the property affected by a state change event.
    #[must_use]
    pub fn property(&self) -> Option<Property> {
        match self {
            Self::StateChanged { change, .. } => Some(change.property()),
            Self::StatusChanged { .. } => None,
        }
    }
}
