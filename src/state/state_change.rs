// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.

use serde::{Deserialize, Serialize};

use super::Property;
use crate::types::{Brightness, LedMode, PowerState};

/// A new value for one property.
///
/// ```
/// use twinkly_lib::state::{Property, StateChange};
/// use twinkly_lib::types::LedMode;
///
/// let change = StateChange::Mode(LedMode::Movie);
/// assert_eq!(change.property(), Property::Mode);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Power switch changed.
    Power(PowerState),
    /// Brightness changed.
    Brightness(Brightness),
    /// Mode changed.
    Mode(LedMode),
    /// Current effect changed.
    CurrentEffect(u32),
    /// Current movie changed.
    CurrentMovie(u32),
}

impl StateChange {
    /// Returns the property this change applies to.
    #[must_use]
    pub const fn property(&self) -> Property {
        match self {
            Self::Power(_) => Property::Switch,
            Self::Brightness(_) => Property::Brightness,
            Self::Mode(_) => Property::Mode,
            Self::CurrentEffect(_) => Property::CurrentEffect,
            Self::CurrentMovie(_) => Property::CurrentMovie,
        }
    }
}
