// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Configuration for a Twinkly device.
///
/// Can be built fluently or deserialized from a settings file.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use twinkly_lib::DeviceConfig;
///
/// let config = DeviceConfig::new("192.168.1.60")
///     .with_timeout(Duration::from_secs(5))
///     .with_refresh_interval(Duration::from_secs(30));
///
/// assert_eq!(config.base_url().unwrap(), "http://192.168.1.60");
/// assert_eq!(config.refresh_interval(), Some(Duration::from_secs(30)));
///
/// let config: DeviceConfig =
///     serde_json::from_str(r#"{"host": "192.168.1.60", "refresh_secs": -1}"#).unwrap();
/// assert_eq!(config.refresh_interval(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    host: String,
    #[serde(default = "DeviceConfig::default_timeout_secs")]
    timeout_secs: u64,
    /// Polling interval in seconds; zero or negative disables polling.
    #[serde(default)]
    refresh_secs: i64,
}

impl DeviceConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    fn default_timeout_secs() -> u64 {
        Self::DEFAULT_TIMEOUT.as_secs()
    }

    /// Creates a configuration for the given host or IP address.
    ///
    /// The host may carry a port (`192.168.1.60:8080`) or a full
    /// `http://`/`https://` base address.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout_secs: Self::default_timeout_secs(),
            refresh_secs: 0,
        }
    }

    /// Sets the request timeout, in whole seconds of at least one.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Sets the state polling interval. A zero duration disables polling.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_secs = i64::try_from(interval.as_secs()).unwrap_or(i64::MAX);
        self
    }

    /// Returns the configured host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the polling interval, or `None` when polling is disabled.
    #[must_use]
    pub fn refresh_interval(&self) -> Option<Duration> {
        u64::try_from(self.refresh_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Builds and validates the base URL of the device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty or does
    /// not form a valid URL.
    pub fn base_url(&self) -> Result<String, ProtocolError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{host}")
        };

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidAddress(format!("{host}: {e}")))?;
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ProtocolError::InvalidAddress(format!("{host}: missing host")));
        }

        Ok(base_url)
    }
}
