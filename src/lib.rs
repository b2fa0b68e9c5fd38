// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Twinkly` Lib - A Rust library to control Twinkly LED devices.
//!
//! This library provides an async client for the JSON/HTTP API of
//! Twinkly devices. The device protects every privileged endpoint with a
//! short-lived token obtained through a challenge-response handshake; the
//! library acquires, renews and, when the device drops it, replaces that
//! token transparently.
//!
//! # Supported Features
//!
//! - **Power control**: on/off view of the LED mode
//! - **LED control**: mode, brightness, current effect, current movie
//! - **Session handling**: login/verify on demand, renewal before expiry,
//!   one retry with a fresh token after a failed request
//! - **State tracking**: periodic polling of linked properties, state
//!   snapshots and change events
//!
//! # Quick Start
//!
//! ## Direct device access
//!
//! ```no_run
//! use twinkly_lib::Device;
//! use twinkly_lib::types::{Brightness, LedMode};
//!
//! #[tokio::main]
//! async fn main() -> twinkly_lib::Result<()> {
//!     let device = Device::http("192.168.1.60").build()?;
//!
//!     device.set_mode(LedMode::Movie).await?;
//!     device.set_brightness(Brightness::new(60)?).await?;
//!     println!("effect #{}", device.get_current_effect().await?);
//!
//!     device.logout().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Polling with state events
//!
//! ```no_run
//! use std::time::Duration;
//! use twinkly_lib::{Device, DeviceConfig, Property};
//!
//! #[tokio::main]
//! async fn main() -> twinkly_lib::Result<()> {
//!     let config: DeviceConfig =
//!         serde_json::from_str(r#"{"host": "192.168.1.60", "refresh_secs": 30}"#)
//!             .expect("valid configuration");
//!
//!     let mut controller = Device::from_config(config).build_controller()?;
//!     controller.link(Property::Switch);
//!     controller.link(Property::Mode);
//!     controller.start();
//!
//!     let mut state = controller.watch();
//!     state.changed().await.ok();
//!     println!("{:?}", *state.borrow());
//!
//!     tokio::time::sleep(Duration::from_secs(120)).await;
//!     controller.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod controller;
mod device;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod executor;
pub mod poller;
pub mod protocol;
pub mod response;
pub mod session;
pub mod state;
pub mod types;

pub use config::DeviceConfig;
pub use controller::Controller;
pub use device::{Device, DeviceBuilder};
pub use dispatcher::{CommandDispatcher, DeviceCommand};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{DeviceEvent, EventBus};
pub use poller::{LinkedProperties, PollerHandle};
pub use protocol::{HttpTransport, Transport};
pub use session::SessionManager;
pub use state::{DeviceState, DeviceStatus, Property, StateChange, StateStore, StatusDetail};
pub use types::{Brightness, LedMode, PowerState};
