// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed operations on a Twinkly device.
//!
//! Each operation is one authenticated request through the
//! [`Executor`](crate::executor::Executor); authentication, token renewal
//! and the single retry on failure happen underneath.
//!
//! ```no_run
//! use twinkly_lib::Device;
//! use twinkly_lib::types::{Brightness, PowerState};
//!
//! # async fn example() -> twinkly_lib::Result<()> {
//! let device = Device::http("192.168.1.60").build()?;
//!
//! device.set_power(PowerState::On).await?;
//! device.set_brightness(Brightness::new(40)?).await?;
//! println!("mode is {}", device.get_mode().await?);
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::DeviceBuilder;

use std::sync::Arc;

use serde_json::Value;

use crate::command::{self, Endpoint};
use crate::config::DeviceConfig;
use crate::error::Error;
use crate::executor::Executor;
use crate::protocol::{HttpTransport, Method, Transport};
use crate::response::{self, BrightnessResponse, EffectResponse, ModeResponse, MovieResponse};
use crate::session::SessionManager;
use crate::types::{Brightness, LedMode, PowerState};

/// A Twinkly device reachable through transport `T`.
pub struct Device<T> {
    host: String,
    executor: Executor<T>,
}

impl Device<HttpTransport> {
    /// Starts building an HTTP device for the given host or IP address.
    #[must_use]
    pub fn http(host: impl Into<String>) -> DeviceBuilder {
        DeviceBuilder::new(DeviceConfig::new(host))
    }

    /// Starts building an HTTP device from an existing configuration.
    #[must_use]
    pub fn from_config(config: DeviceConfig) -> DeviceBuilder {
        DeviceBuilder::new(config)
    }
}

impl<T: Transport> Device<T> {
    /// Creates a device using a custom transport.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the configured host does
    /// not form a valid base URL.
    pub fn with_transport(config: &DeviceConfig, transport: Arc<T>) -> Result<Self, Error> {
        let base_url = config.base_url()?;
        let session = Arc::new(SessionManager::new(Arc::clone(&transport), base_url));
        Ok(Self {
            host: config.host().to_string(),
            executor: Executor::new(transport, session),
        })
    }

    /// Returns the configured host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the authentication session of this device.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager<T>> {
        self.executor.session()
    }

    async fn get(&self, endpoint: Endpoint) -> Result<Value, Error> {
        self.executor.execute(endpoint, Method::Get, None).await
    }

    async fn post(&self, endpoint: Endpoint, body: Value) -> Result<(), Error> {
        self.executor
            .execute(endpoint, Method::Post, Some(body))
            .await
            .map(drop)
    }

    // ========== Mode ==========

    /// Reads the current LED mode.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the mode is unknown.
    pub async fn get_mode(&self) -> Result<LedMode, Error> {
        let response: ModeResponse = response::parse(self.get(Endpoint::Mode).await?)?;
        Ok(response.mode()?)
    }

    /// Selects a new LED mode.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_mode(&self, mode: LedMode) -> Result<(), Error> {
        tracing::debug!(host = %self.host, %mode, "Setting mode");
        self.post(Endpoint::Mode, command::mode_body(mode)).await
    }

    /// Selects a new LED mode given by name.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMode` without contacting the device if
    /// the name is not a known mode.
    pub async fn set_mode_named(&self, mode: &str) -> Result<(), Error> {
        let mode: LedMode = mode.parse()?;
        self.set_mode(mode).await
    }

    // ========== Power ==========

    /// Reads the power state; any mode other than `off` counts as on.
    ///
    /// # Errors
    ///
    /// Returns error if the mode cannot be read.
    pub async fn get_power(&self) -> Result<PowerState, Error> {
        Ok(self.get_mode().await?.power())
    }

    /// Switches the LEDs off, or on by resuming the movie.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_power(&self, state: PowerState) -> Result<(), Error> {
        self.set_mode(state.target_mode()).await
    }

    // ========== Brightness ==========

    /// Reads the brightness.
    ///
    /// The mode is read first; while it is `off` the brightness is
    /// [`Brightness::OFF`] and the brightness endpoint is not queried.
    ///
    /// # Errors
    ///
    /// Returns error if a request fails or the value is out of range.
    pub async fn get_brightness(&self) -> Result<Brightness, Error> {
        if !self.get_mode().await?.is_on() {
            return Ok(Brightness::OFF);
        }
        let response: BrightnessResponse =
            response::parse(self.get(Endpoint::Brightness).await?)?;
        Ok(response.brightness()?)
    }

    /// Sets an absolute brightness.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_brightness(&self, brightness: Brightness) -> Result<(), Error> {
        tracing::debug!(host = %self.host, %brightness, "Setting brightness");
        self.post(Endpoint::Brightness, command::brightness_body(brightness))
            .await
    }

    // ========== Effects and movies ==========

    /// Reads the current effect index.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or no index is reported.
    pub async fn get_current_effect(&self) -> Result<u32, Error> {
        let response: EffectResponse = response::parse(self.get(Endpoint::CurrentEffect).await?)?;
        Ok(response.index()?)
    }

    /// Selects the current effect.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_current_effect(&self, index: u32) -> Result<(), Error> {
        self.post(Endpoint::CurrentEffect, command::effect_body(index))
            .await
    }

    /// Reads the current movie id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_current_movie(&self) -> Result<u32, Error> {
        let response: MovieResponse = response::parse(self.get(Endpoint::CurrentMovie).await?)?;
        Ok(response.id())
    }

    /// Selects the current movie.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_current_movie(&self, id: u32) -> Result<(), Error> {
        self.post(Endpoint::CurrentMovie, command::movie_body(id))
            .await
    }

    /// Logs out of the device, ignoring failures.
    pub async fn logout(&self) {
        self.session().logout().await;
    }
}

impl<T> std::fmt::Debug for Device<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, ProtocolError, ValueError};
    use crate::protocol::scripted::FakeDevice;

    fn device(fake: FakeDevice) -> (Arc<FakeDevice>, Device<FakeDevice>) {
        let fake = Arc::new(fake);
        let device =
            Device::with_transport(&DeviceConfig::new("tree.local"), Arc::clone(&fake)).unwrap();
        (fake, device)
    }

    #[tokio::test]
    async fn power_follows_mode() {
        let (_fake, device) = device(FakeDevice::new().with_mode("movie"));
        assert_eq!(device.get_power().await.unwrap(), PowerState::On);

        device.set_power(PowerState::Off).await.unwrap();
        assert_eq!(device.get_mode().await.unwrap(), LedMode::Off);
        assert_eq!(device.get_power().await.unwrap(), PowerState::Off);

        device.set_power(PowerState::On).await.unwrap();
        assert_eq!(device.get_mode().await.unwrap(), LedMode::Movie);
    }

    #[tokio::test]
    async fn brightness_reads_zero_when_off_without_request() {
        let (fake, device) = device(FakeDevice::new().with_mode("off"));

        for _ in 0..3 {
            assert_eq!(device.get_brightness().await.unwrap(), Brightness::OFF);
        }
        assert_eq!(fake.count(Endpoint::Brightness), 0);
    }

    #[tokio::test]
    async fn brightness_round_trip() {
        let (fake, device) = device(FakeDevice::new());

        device
            .set_brightness(Brightness::new(42).unwrap())
            .await
            .unwrap();
        assert_eq!(device.get_brightness().await.unwrap().value(), 42);

        let post = fake
            .requests()
            .into_iter()
            .find(|r| r.url.ends_with(Endpoint::Brightness.path()) && r.method == Method::Post)
            .unwrap();
        assert_eq!(
            post.body,
            Some(serde_json::json!({"mode": "enabled", "type": "A", "value": 42}))
        );
    }

    #[tokio::test]
    async fn effect_accepts_preset_id() {
        let (_fake, device) = device(FakeDevice::new().reporting_preset_id());

        device.set_current_effect(3).await.unwrap();
        assert_eq!(device.get_current_effect().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn effect_write_carries_both_fields() {
        let (fake, device) = device(FakeDevice::new());

        device.set_current_effect(5).await.unwrap();

        let post = fake.requests().pop().unwrap();
        assert_eq!(
            post.body,
            Some(serde_json::json!({"preset_id": 5, "effect_id": 5}))
        );
        assert_eq!(device.get_current_effect().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn movie_round_trip() {
        let (_fake, device) = device(FakeDevice::new());

        device.set_current_movie(2).await.unwrap();
        assert_eq!(device.get_current_movie().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unknown_mode_name_is_rejected_before_sending() {
        let (fake, device) = device(FakeDevice::new());

        let err = device.set_mode_named("disco").await.unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::InvalidMode(_))));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_reported_mode_is_a_parse_error() {
        let (_fake, device) = device(FakeDevice::new().with_mode("party"));

        let err = device.get_mode().await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let err = Device::with_transport(&DeviceConfig::new(""), Arc::new(FakeDevice::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::InvalidAddress(_))
        ));
    }
}
