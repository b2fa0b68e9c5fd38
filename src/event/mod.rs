// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for device state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so any number of
//! subscribers can follow what the dispatcher and the poller publish.
//!
//! # Examples
//!
//! ```
//! use twinkly_lib::event::{DeviceEvent, EventBus};
//! use twinkly_lib::state::DeviceStatus;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::StatusChanged { status: DeviceStatus::Online });
//! ```

mod device_event;
mod event_bus;

pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
