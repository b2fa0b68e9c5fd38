// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::sync::Arc;
use std::time::Duration;

use crate::config::DeviceConfig;
use crate::controller::Controller;
use crate::device::Device;
use crate::error::Error;
use crate::protocol::HttpTransport;

/// Builder for HTTP-based devices.
///
/// Created with [`Device::http`] or [`Device::from_config`].
///
/// ```no_run
/// use std::time::Duration;
/// use twinkly_lib::Device;
///
/// # async fn example() -> twinkly_lib::Result<()> {
/// // Bare device facade
/// let device = Device::http("192.168.1.60")
///     .with_timeout(Duration::from_secs(3))
///     .build()?;
///
/// // Device with state store and a 30 second poller
/// let controller = Device::http("192.168.1.60")
///     .with_refresh_interval(Duration::from_secs(30))
///     .build_controller()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceBuilder {
    config: DeviceConfig,
}

impl DeviceBuilder {
    pub(crate) fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the polling interval used by [`build_controller`](Self::build_controller).
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_refresh_interval(interval);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Builds the device.
    ///
    /// No request is sent; the first operation logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the host is not a valid address or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<Device<HttpTransport>, Error> {
        let transport = HttpTransport::from_config(&self.config)?;
        Device::with_transport(&self.config, Arc::new(transport))
    }

    /// Builds a [`Controller`] around the device, using the configured
    /// refresh interval for its poller.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_controller(self) -> Result<Controller<HttpTransport>, Error> {
        let interval = self.config.refresh_interval();
        let device = self.build()?;
        Ok(Controller::new(device, interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn build_keeps_host() {
        let device = Device::http("192.168.1.60").build().unwrap();
        assert_eq!(device.host(), "192.168.1.60");
        assert_eq!(device.session().base_url(), "http://192.168.1.60");
    }

    #[test]
    fn build_rejects_invalid_host() {
        let err = Device::http("bad host").build().unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn builder_updates_config() {
        let builder = Device::http("192.168.1.60")
            .with_timeout(Duration::from_secs(4))
            .with_refresh_interval(Duration::from_secs(20));
        assert_eq!(builder.config().timeout(), Duration::from_secs(4));
        assert_eq!(
            builder.config().refresh_interval(),
            Some(Duration::from_secs(20))
        );
    }
}
