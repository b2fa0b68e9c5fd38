// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device, state store, dispatcher and poller wired together.
//!
//! ```no_run
//! use std::time::Duration;
//! use twinkly_lib::{Device, DeviceCommand, Property};
//!
//! # async fn example() -> twinkly_lib::Result<()> {
//! let mut controller = Device::http("192.168.1.60")
//!     .with_refresh_interval(Duration::from_secs(30))
//!     .build_controller()?;
//!
//! controller.link(Property::Switch);
//! controller.link(Property::Brightness);
//! controller.start();
//!
//! let mut events = controller.subscribe();
//! controller
//!     .handle(Property::Switch, DeviceCommand::OnOff(true.into()))
//!     .await?;
//! while let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//!
//! controller.shutdown().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};

use crate::device::Device;
use crate::dispatcher::{CommandDispatcher, DeviceCommand};
use crate::error::Error;
use crate::event::DeviceEvent;
use crate::poller::{LinkedProperties, Poller, PollerHandle};
use crate::protocol::Transport;
use crate::state::{DeviceState, Property, StateStore};

/// Owner of one device and its background polling.
pub struct Controller<T> {
    dispatcher: CommandDispatcher<T>,
    linked: LinkedProperties,
    interval: Option<Duration>,
    poller: Option<PollerHandle>,
}

impl<T: Transport> Controller<T> {
    /// Creates a controller; polling starts with [`start`](Self::start).
    ///
    /// `interval` of `None` or zero disables polling.
    #[must_use]
    pub fn new(device: Device<T>, interval: Option<Duration>) -> Self {
        let store = Arc::new(StateStore::new());
        Self {
            dispatcher: CommandDispatcher::new(Arc::new(device), store),
            linked: LinkedProperties::new(),
            interval,
            poller: None,
        }
    }

    /// Starts the poller if enabled and not already running.
    ///
    /// Returns `true` if polling is active afterwards. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.poller.is_none() {
            self.poller = Poller::spawn(self.dispatcher.clone(), self.linked.clone(), self.interval);
            if self.poller.is_none() {
                tracing::debug!(host = %self.device().host(), "State polling disabled");
            }
        }
        self.poller.is_some()
    }

    /// Returns `true` if the poller is running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollerHandle::is_running)
    }

    /// Handles a command for one property.
    ///
    /// # Errors
    ///
    /// See [`CommandDispatcher::dispatch`].
    pub async fn handle(&self, property: Property, command: DeviceCommand) -> Result<(), Error> {
        self.dispatcher.dispatch(property, command).await
    }

    /// Includes a property in polling.
    pub fn link(&self, property: Property) -> bool {
        self.linked.link(property)
    }

    /// Excludes a property from polling.
    pub fn unlink(&self, property: Property) -> bool {
        self.linked.unlink(property)
    }

    /// Returns the linked properties.
    #[must_use]
    pub fn linked(&self) -> &LinkedProperties {
        &self.linked
    }

    /// Returns the device.
    #[must_use]
    pub fn device(&self) -> &Arc<Device<T>> {
        self.dispatcher.device()
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &Arc<StateStore> {
        self.dispatcher.store()
    }

    /// Returns the current state snapshot.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.store().snapshot()
    }

    /// Returns a receiver of state snapshots.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.store().watch()
    }

    /// Subscribes to device events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.store().subscribe()
    }

    /// Stops polling and logs out of the device.
    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
        self.device().logout().await;
        tracing::info!(host = %self.device().host(), "Controller shut down");
    }
}

impl<T> std::fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("dispatcher", &self.dispatcher)
            .field("linked", &self.linked)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
