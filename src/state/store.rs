// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State sink shared by the dispatcher and the poller.

use tokio::sync::{broadcast, watch};

use super::{DeviceState, DeviceStatus, StateChange};
use crate::event::{DeviceEvent, EventBus};

/// Holds the latest [`DeviceState`] and notifies observers of changes.
///
/// Observers can either watch the whole snapshot or subscribe to
/// individual [`DeviceEvent`]s.
///
/// ```
/// use twinkly_lib::state::{StateChange, StateStore};
/// use twinkly_lib::types::LedMode;
///
/// let store = StateStore::new();
/// let watcher = store.watch();
///
/// store.publish(StateChange::Mode(LedMode::Effect));
/// assert_eq!(watcher.borrow().mode(), Some(LedMode::Effect));
/// ```
#[derive(Debug)]
pub struct StateStore {
    state_tx: watch::Sender<DeviceState>,
    events: EventBus,
}

impl StateStore {
    /// Creates a store with an empty state.
    #[must_use]
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(DeviceState::new());
        Self {
            state_tx,
            events: EventBus::new(),
        }
    }

    /// Applies a change; emits an event if the value actually changed.
    ///
    /// Returns `true` if the state changed.
    pub fn publish(&self, change: StateChange) -> bool {
        let changed = self.state_tx.send_if_modified(|state| state.apply(&change));
        if changed {
            tracing::debug!(property = %change.property(), change = ?change, "State changed");
            self.events.publish(DeviceEvent::StateChanged {
                change,
                new_state: self.snapshot(),
            });
        }
        changed
    }

    /// Sets the device status; emits an event if it changed.
    ///
    /// Returns `true` if the status changed.
    pub fn set_status(&self, status: DeviceStatus) -> bool {
        let changed = self
            .state_tx
            .send_if_modified(|state| state.set_status(status.clone()));
        if changed {
            tracing::info!(%status, "Device status changed");
            self.events.publish(DeviceEvent::StatusChanged { status });
        }
        changed
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DeviceState {
        self.state_tx.borrow().clone()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        self.state_tx.borrow().status().clone()
    }

    /// Returns a receiver that always sees the latest state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.state_tx.subscribe()
    }

    /// Subscribes to state and status events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
