// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic state reconciliation.
//!
//! The poller refreshes every linked property once per tick through the
//! [`CommandDispatcher`], so a failed read marks the device offline and
//! drops the session exactly like a failed user command would. Ticks are
//! separated by a fixed delay measured from the end of the previous tick.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::dispatcher::{CommandDispatcher, DeviceCommand};
use crate::protocol::Transport;
use crate::state::Property;

/// Set of properties an observer is interested in.
///
/// Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct LinkedProperties {
    inner: Arc<RwLock<BTreeSet<Property>>>,
}

impl LinkedProperties {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property; returns `false` if it was already linked.
    pub fn link(&self, property: Property) -> bool {
        self.inner.write().insert(property)
    }

    /// Removes a property; returns `false` if it was not linked.
    pub fn unlink(&self, property: Property) -> bool {
        self.inner.write().remove(&property)
    }

    /// Returns `true` if the property is linked.
    #[must_use]
    pub fn contains(&self, property: Property) -> bool {
        self.inner.read().contains(&property)
    }

    /// Returns the linked properties in polling order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Property> {
        self.inner.read().iter().copied().collect()
    }
}

/// Background reconciliation loop.
pub struct Poller;

impl Poller {
    /// Spawns the loop on the current tokio runtime.
    ///
    /// Returns `None` without spawning anything when `interval` is `None`
    /// or zero. The first tick runs immediately.
    #[must_use]
    pub fn spawn<T: Transport>(
        dispatcher: CommandDispatcher<T>,
        linked: LinkedProperties,
        interval: Option<Duration>,
    ) -> Option<PollerHandle> {
        let interval = interval.filter(|i| !i.is_zero())?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tracing::info!(
            host = %dispatcher.device().host(),
            interval_secs = interval.as_secs_f64(),
            "Starting state polling"
        );
        let task = tokio::spawn(run(dispatcher, linked, interval, shutdown_rx));

        Some(PollerHandle {
            shutdown_tx,
            task: Some(task),
        })
    }
}

async fn run<T: Transport>(
    dispatcher: CommandDispatcher<T>,
    linked: LinkedProperties,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            () = tick(&dispatcher, &linked) => {}
            _ = shutdown_rx.changed() => break,
        }
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = shutdown_rx.changed() => break,
        }
    }
    tracing::debug!(host = %dispatcher.device().host(), "State polling stopped");
}

/// Refreshes every linked property once; failures are logged and skipped.
async fn tick<T: Transport>(dispatcher: &CommandDispatcher<T>, linked: &LinkedProperties) {
    for property in linked.snapshot() {
        if let Err(err) = dispatcher.dispatch(property, DeviceCommand::Refresh).await {
            tracing::warn!(%property, error = %err, "Failed to refresh property");
        }
    }
}

/// Handle to a running poller.
///
/// Dropping the handle aborts the loop; [`stop`](Self::stop) ends it
/// gracefully and waits for it.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signals the loop to stop and waits until it has exited.
    ///
    /// An in-flight refresh is abandoned rather than awaited.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(err) = task.await {
            tracing::warn!(error = %err, "Polling task ended abnormally");
        }
    }

    /// Returns `true` if the loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
