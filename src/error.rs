// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Twinkly library.
//!
//! Failures are grouped by where they arise: value validation before a
//! request is built, the HTTP exchange itself, and decoding of a response
//! body. An unusable device address is reported as a protocol error when
//! the device is built.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An unknown LED mode string was provided.
    #[error("invalid LED mode: {0}")]
    InvalidMode(String),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An unknown property identifier was provided.
    #[error("unknown property: {0}")]
    InvalidProperty(String),

    /// A command value does not fit the targeted property.
    #[error("{property} does not accept {value}")]
    MismatchedValue {
        /// The targeted property.
        property: String,
        /// Description of the rejected value.
        value: String,
    },
}

/// Errors related to the HTTP exchange with the device.
///
/// The device reports a rejected token the same way it reports most other
/// failures, so every variant here is treated as "maybe auth, maybe
/// network" by the executor.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device rejected the authentication token.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The response body was not valid JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidMode("disco".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidMode(ref m)) if m == "disco"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("mode".to_string());
        assert_eq!(err.to_string(), "missing field in response: mode");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::InvalidAddress("bad host".to_string()).into();
        assert_eq!(err.to_string(), "protocol error: invalid address: bad host");
    }
}
