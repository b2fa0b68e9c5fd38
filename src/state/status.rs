// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device availability status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a device is offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusDetail {
    /// The device could not be reached or rejected the request.
    CommunicationError,
}

/// Availability of the device as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// Nothing has been sent yet.
    #[default]
    Unknown,
    /// The last operation succeeded.
    Online,
    /// The last operation failed.
    Offline {
        /// Failure category.
        detail: StatusDetail,
        /// Human-readable description.
        message: Option<String>,
    },
}

impl DeviceStatus {
    /// Offline status after a failed exchange with the device at `host`.
    #[must_use]
    pub fn communication_error(host: &str) -> Self {
        Self::Offline {
            detail: StatusDetail::CommunicationError,
            message: Some(format!("Could not control device at IP address {host}")),
        }
    }

    /// Returns `true` if the device is online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Returns the offline detail, if offline.
    #[must_use]
    pub fn detail(&self) -> Option<StatusDetail> {
        match self {
            Self::Offline { detail, .. } => Some(*detail),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Online => f.write_str("online"),
            Self::Offline {
                message: Some(message),
                ..
            } => write!(f, "offline: {message}"),
            Self::Offline { detail, .. } => write!(f, "offline ({detail:?})"),
        }
    }
}
