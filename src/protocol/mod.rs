// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to Twinkly devices.
//!
//! A [`Transport`] performs exactly one JSON request/response exchange. It
//! knows nothing about sessions or retries; those live in
//! [`SessionManager`](crate::session::SessionManager) and
//! [`Executor`](crate::executor::Executor).
//!
//! - [`HttpTransport`]: reqwest-based implementation used against real devices

mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use http::HttpTransport;

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::error::ProtocolError;

/// Header carrying the authentication token.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// HTTP method of a device request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read the current value.
    Get,
    /// Write a new value or perform an action.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A single request to the device.
#[derive(Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Token sent in the [`AUTH_HEADER`] header.
    pub token: Option<String>,
}

impl Request {
    /// Creates a request without body or token.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            token: None,
        }
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches an authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl fmt::Debug for Request {
    // Tokens stay out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("body", &self.body)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

/// A transport able to perform one request against a device.
///
/// Implementations must be cheap to share across tasks; the session
/// manager and the executor hold the same transport.
pub trait Transport: Send + Sync + 'static {
    /// Performs the request and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails for any reason,
    /// including a rejected token or a body that is not JSON.
    fn send(&self, request: Request) -> impl Future<Output = Result<Value, ProtocolError>> + Send;
}
