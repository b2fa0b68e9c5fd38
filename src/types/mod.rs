// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Twinkly device control.
//!
//! Each type is validated at construction time, so a request body built
//! from these values never needs to be checked again.
//!
//! # Types
//!
//! - [`LedMode`] - Device operating mode (off, color, demo, effect, movie, playlist, rt)
//! - [`PowerState`] - Simplified on/off view of the mode
//! - [`Brightness`] - Brightness level (0-100%)

mod brightness;
mod mode;

pub use brightness::Brightness;
pub use mode::{LedMode, PowerState};
