// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing of property commands to device operations.
//!
//! A [`DeviceCommand`] targets one [`Property`]. Refreshing reads the value
//! from the device and publishes it to the [`StateStore`]; setting writes
//! it and, for the power switch, publishes the requested value right away.
//!
//! Failures never escape as a broken client: the store is marked offline,
//! the session is dropped so the next command logs in from scratch, and
//! the error is returned to the caller for information.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::state::{DeviceStatus, Property, StateChange, StateStore};
use crate::types::{Brightness, PowerState};

/// What to do with a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum DeviceCommand {
    /// Read the current value and publish it.
    Refresh,
    /// Switch on or off.
    OnOff(PowerState),
    /// Set a percentage.
    Percent(Brightness),
    /// Set a textual value such as a mode name.
    Text(String),
    /// Set a numeric value such as an effect index.
    Number(u32),
}

impl DeviceCommand {
    /// Returns `true` for [`Refresh`](Self::Refresh) and for the text
    /// `REFRESH` in any case.
    #[must_use]
    pub fn is_refresh(&self) -> bool {
        match self {
            Self::Refresh => true,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("refresh"),
            _ => false,
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh => f.write_str("REFRESH"),
            Self::OnOff(state) => write!(f, "{state}"),
            Self::Percent(brightness) => write!(f, "{brightness}"),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Executes property commands against a device and publishes results.
pub struct CommandDispatcher<T> {
    device: Arc<Device<T>>,
    store: Arc<StateStore>,
}

impl<T: Transport> CommandDispatcher<T> {
    /// Creates a dispatcher publishing to `store`.
    #[must_use]
    pub fn new(device: Arc<Device<T>>, store: Arc<StateStore>) -> Self {
        Self { device, store }
    }

    /// Returns the device.
    #[must_use]
    pub fn device(&self) -> &Arc<Device<T>> {
        &self.device
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Handles one command for `property`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MismatchedValue` if the command does not fit the
    /// property (nothing is sent and the status is untouched), or the
    /// device error after marking the device offline.
    pub async fn dispatch(&self, property: Property, command: DeviceCommand) -> Result<(), Error> {
        tracing::debug!(host = %self.device.host(), %property, %command, "Handling command");

        let result = if command.is_refresh() {
            self.refresh(property).await
        } else {
            self.set(property, command).await
        };

        match result {
            Ok(()) => {
                self.store.set_status(DeviceStatus::Online);
                Ok(())
            }
            Err(Error::Value(err)) => {
                tracing::warn!(%property, error = %err, "Unexpected command");
                Err(err.into())
            }
            Err(err) => {
                self.mark_offline(&err).await;
                Err(err)
            }
        }
    }

    async fn refresh(&self, property: Property) -> Result<(), Error> {
        let change = match property {
            Property::Switch => StateChange::Power(self.device.get_power().await?),
            Property::Brightness => StateChange::Brightness(self.device.get_brightness().await?),
            Property::Mode => StateChange::Mode(self.device.get_mode().await?),
            Property::CurrentEffect => {
                StateChange::CurrentEffect(self.device.get_current_effect().await?)
            }
            Property::CurrentMovie => {
                StateChange::CurrentMovie(self.device.get_current_movie().await?)
            }
        };
        self.store.publish(change);
        Ok(())
    }

    async fn set(&self, property: Property, command: DeviceCommand) -> Result<(), Error> {
        match (property, command) {
            (Property::Switch, DeviceCommand::OnOff(state)) => {
                self.device.set_power(state).await?;
                self.store.publish(StateChange::Power(state));
            }
            (Property::Brightness, DeviceCommand::Percent(brightness)) => {
                self.device.set_brightness(brightness).await?;
            }
            (Property::Mode, DeviceCommand::Text(mode)) => {
                self.device.set_mode_named(&mode).await?;
            }
            (Property::CurrentEffect, DeviceCommand::Number(index)) => {
                self.device.set_current_effect(index).await?;
            }
            (Property::CurrentMovie, DeviceCommand::Number(id)) => {
                self.device.set_current_movie(id).await?;
            }
            (property, command) => {
                return Err(ValueError::MismatchedValue {
                    property: property.to_string(),
                    value: command.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    async fn mark_offline(&self, err: &Error) {
        tracing::error!(host = %self.device.host(), error = %err, "Error communicating with device");
        self.store
            .set_status(DeviceStatus::communication_error(self.device.host()));
        self.device.session().invalidate().await;
    }
}

impl<T> Clone for CommandDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            device: Arc::clone(&self.device),
            store: Arc::clone(&self.store),
        }
    }
}

impl<T> fmt::Debug for CommandDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Endpoint;
    use crate::config::DeviceConfig;
    use crate::protocol::Method;
    use crate::protocol::scripted::FakeDevice;
    use crate::state::StatusDetail;
    use crate::types::LedMode;

    fn dispatcher(fake: FakeDevice) -> (Arc<FakeDevice>, CommandDispatcher<FakeDevice>) {
        let fake = Arc::new(fake);
        let device =
            Device::with_transport(&DeviceConfig::new("10.0.0.7"), Arc::clone(&fake)).unwrap();
        let dispatcher = CommandDispatcher::new(Arc::new(device), Arc::new(StateStore::new()));
        (fake, dispatcher)
    }

    #[tokio::test]
    async fn refresh_publishes_value_and_marks_online() {
        let (_fake, dispatcher) = dispatcher(FakeDevice::new().with_mode("movie"));

        dispatcher
            .dispatch(Property::Switch, DeviceCommand::Refresh)
            .await
            .unwrap();
        dispatcher
            .dispatch(Property::Mode, DeviceCommand::Refresh)
            .await
            .unwrap();

        let state = dispatcher.store().snapshot();
        assert_eq!(state.power(), Some(PowerState::On));
        assert_eq!(state.mode(), Some(LedMode::Movie));
        assert!(state.status().is_online());
    }

    #[tokio::test]
    async fn brightness_refresh_reads_zero_when_off() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new().with_mode("off"));

        dispatcher
            .dispatch(Property::Brightness, DeviceCommand::Refresh)
            .await
            .unwrap();

        assert_eq!(dispatcher.store().snapshot().brightness(), Some(Brightness::OFF));
        assert_eq!(fake.count(Endpoint::Brightness), 0);
    }

    #[tokio::test]
    async fn switch_is_published_optimistically() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new());

        dispatcher
            .dispatch(Property::Switch, DeviceCommand::OnOff(PowerState::Off))
            .await
            .unwrap();

        assert_eq!(dispatcher.store().snapshot().power(), Some(PowerState::Off));
        assert_eq!(fake.count_method(Endpoint::Mode, Method::Get), 0);
        assert_eq!(fake.count_method(Endpoint::Mode, Method::Post), 1);
    }

    #[tokio::test]
    async fn other_sets_are_not_published() {
        let (_fake, dispatcher) = dispatcher(FakeDevice::new());

        dispatcher
            .dispatch(Property::CurrentMovie, DeviceCommand::Number(4))
            .await
            .unwrap();

        assert_eq!(dispatcher.store().snapshot().current_movie(), None);
        assert_eq!(dispatcher.device().get_current_movie().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn failure_marks_offline_and_clears_session() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new());
        dispatcher
            .dispatch(Property::Mode, DeviceCommand::Refresh)
            .await
            .unwrap();
        fake.fail(Endpoint::Mode, 2);

        let err = dispatcher
            .dispatch(Property::Mode, DeviceCommand::Refresh)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
        let status = dispatcher.store().status();
        assert_eq!(status.detail(), Some(StatusDetail::CommunicationError));
        assert_eq!(
            status,
            DeviceStatus::communication_error("10.0.0.7")
        );
        assert!(!dispatcher.device().session().has_token().await);
        // first login, re-login inside the executor, nothing more
        assert_eq!(fake.count(Endpoint::Login), 2);
    }

    #[tokio::test]
    async fn next_command_after_failure_logs_in_again() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new());
        fake.fail(Endpoint::CurrentEffect, 2);

        assert!(
            dispatcher
                .dispatch(Property::CurrentEffect, DeviceCommand::Refresh)
                .await
                .is_err()
        );
        dispatcher
            .dispatch(Property::CurrentEffect, DeviceCommand::Refresh)
            .await
            .unwrap();

        assert!(dispatcher.store().status().is_online());
        assert_eq!(fake.count(Endpoint::Login), 3);
    }

    #[tokio::test]
    async fn mismatched_value_is_rejected_without_request() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new());

        let err = dispatcher
            .dispatch(Property::Switch, DeviceCommand::Number(1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::MismatchedValue { .. })));
        assert!(fake.requests().is_empty());
        assert_eq!(dispatcher.store().status(), DeviceStatus::Unknown);
    }

    #[tokio::test]
    async fn unknown_mode_name_is_rejected() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new());

        let err = dispatcher
            .dispatch(Property::Mode, DeviceCommand::Text("disco".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::InvalidMode(_))));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn refresh_text_on_mode_reads_the_mode() {
        let (fake, dispatcher) = dispatcher(FakeDevice::new().with_mode("demo"));

        dispatcher
            .dispatch(Property::Mode, DeviceCommand::Text("REFRESH".into()))
            .await
            .unwrap();
        dispatcher
            .dispatch(Property::Mode, DeviceCommand::Text("refresh".into()))
            .await
            .unwrap();

        assert_eq!(dispatcher.store().snapshot().mode(), Some(LedMode::Demo));
        assert_eq!(fake.count_method(Endpoint::Mode, Method::Get), 2);
        assert_eq!(fake.count_method(Endpoint::Mode, Method::Post), 0);
    }

    #[test]
    fn command_serializes_tagged() {
        let json = serde_json::to_value(DeviceCommand::Number(3)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "number", "value": 3}));

        let parsed: DeviceCommand =
            serde_json::from_value(serde_json::json!({"type": "refresh"})).unwrap();
        assert_eq!(parsed, DeviceCommand::Refresh);
    }
}
