// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable device state.
//!
//! The device is polled, never pushed from, so [`DeviceState`] only holds
//! the latest values published by the dispatcher and the poller. Each
//! published value is a [`StateChange`]; the [`StateStore`] applies it and
//! notifies subscribers when the snapshot actually changed.
//!
//! # Examples
//!
//! ```
//! use twinkly_lib::state::{DeviceState, StateChange};
//! use twinkly_lib::types::PowerState;
//!
//! let mut state = DeviceState::new();
//! assert!(state.apply(&StateChange::Power(PowerState::On)));
//! assert_eq!(state.power(), Some(PowerState::On));
//!
//! // Same value again is not a change.
//! assert!(!state.apply(&StateChange::Power(PowerState::On)));
//! ```

mod device_state;
mod property;
mod state_change;
mod status;
mod store;

pub use device_state::DeviceState;
pub use property::Property;
pub use state_change::StateChange;
pub use status::{DeviceStatus, StatusDetail};
pub use store::StateStore;
