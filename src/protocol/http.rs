// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for Twinkly devices.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::DeviceConfig;
use crate::error::ProtocolError;
use crate::protocol::{AUTH_HEADER, Method, Request, Transport};

/// reqwest-backed [`Transport`].
///
/// Each call is an independent request; the client's connection pool is
/// shared between clones.
///
/// # Examples
///
/// ```no_run
/// use twinkly_lib::protocol::{HttpTransport, Method, Request, Transport};
///
/// # async fn example() -> Result<(), twinkly_lib::ProtocolError> {
/// let transport = HttpTransport::new()?;
/// let body = transport
///     .send(Request::new(Method::Get, "http://192.168.1.60/xled/v1/gestalt"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        Self::with_timeout(DeviceConfig::DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;
        Ok(Self { client })
    }

    /// Creates a transport configured from a [`DeviceConfig`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &DeviceConfig) -> Result<Self, ProtocolError> {
        Self::with_timeout(config.timeout())
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Value, ProtocolError> {
        tracing::debug!(method = %request.method, url = %request.url, body = ?request.body, "Sending HTTP request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(token) = &request.token {
            builder = builder.header(AUTH_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(url = %request.url, body = %body, "Received HTTP response");

        parse_body(&body)
    }
}

fn parse_body(body: &str) -> Result<Value, ProtocolError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
}
