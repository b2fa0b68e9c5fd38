// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Twinkly endpoints and request bodies.
//!
//! | Endpoint | Methods | Body |
//! |----------|---------|------|
//! | [`Endpoint::Login`] | POST | `{"challenge": "..."}` |
//! | [`Endpoint::Verify`] | POST | `{"challenge-response": "..."}` |
//! | [`Endpoint::Logout`] | POST | `{}` |
//! | [`Endpoint::Mode`] | GET/POST | `{"mode": "movie"}` |
//! | [`Endpoint::Brightness`] | GET/POST | `{"mode": "enabled", "type": "A", "value": 42}` |
//! | [`Endpoint::CurrentEffect`] | GET/POST | `{"preset_id": 3, "effect_id": 3}` |
//! | [`Endpoint::CurrentMovie`] | GET/POST | `{"id": 2}` |
//!
//! # Examples
//!
//! ```
//! use twinkly_lib::command::{self, Endpoint};
//! use twinkly_lib::types::{Brightness, LedMode};
//!
//! assert_eq!(Endpoint::Mode.path(), "/xled/v1/led/mode");
//! assert_eq!(command::mode_body(LedMode::Off)["mode"], "off");
//! assert_eq!(command::brightness_body(Brightness::new(42).unwrap())["value"], 42);
//! ```

use std::fmt;

use serde_json::{Value, json};

use crate::types::{Brightness, LedMode};

/// Fixed login challenge. The device derives its challenge-response from
/// whatever 64 characters it receives.
pub const LOGIN_CHALLENGE: &str =
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// A device API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Starts the authentication handshake.
    Login,
    /// Completes the handshake, promoting the token to valid.
    Verify,
    /// Invalidates the current token.
    Logout,
    /// LED operating mode.
    Mode,
    /// LED output brightness.
    Brightness,
    /// Current effect.
    CurrentEffect,
    /// Current movie.
    CurrentMovie,
}

impl Endpoint {
    /// Every endpoint, in handshake-first order.
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::Verify,
        Self::Logout,
        Self::Mode,
        Self::Brightness,
        Self::CurrentEffect,
        Self::CurrentMovie,
    ];

    /// Returns the path relative to the device base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => "/xled/v1/login",
            Self::Verify => "/xled/v1/verify",
            Self::Logout => "/xled/v1/logout",
            Self::Mode => "/xled/v1/led/mode",
            Self::Brightness => "/xled/v1/led/out/brightness",
            Self::CurrentEffect => "/xled/v1/led/effects/current",
            Self::CurrentMovie => "/xled/v1/movies/current",
        }
    }

    /// Returns the absolute URL of this endpoint on the given device.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Body of the login request.
#[must_use]
pub fn login_body() -> Value {
    json!({ "challenge": LOGIN_CHALLENGE })
}

/// Body of the verify request.
#[must_use]
pub fn verify_body(challenge_response: &str) -> Value {
    json!({ "challenge-response": challenge_response })
}

/// Body of the logout request.
#[must_use]
pub fn logout_body() -> Value {
    json!({})
}

/// Body selecting a new LED mode.
#[must_use]
pub fn mode_body(mode: LedMode) -> Value {
    json!({ "mode": mode.as_str() })
}

/// Body setting an absolute brightness.
#[must_use]
pub fn brightness_body(brightness: Brightness) -> Value {
    json!({ "mode": "enabled", "type": "A", "value": brightness.value() })
}

/// Body selecting the current effect.
///
/// Firmware versions disagree on the field name, so the index is sent
/// under both.
#[must_use]
pub fn effect_body(index: u32) -> Value {
    json!({ "preset_id": index, "effect_id": index })
}

/// Body selecting the current movie.
#[must_use]
pub fn movie_body(id: u32) -> Value {
    json!({ "id": id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_64_bytes() {
        assert_eq!(LOGIN_CHALLENGE.len(), 64);
        assert_eq!(login_body(), json!({"challenge": LOGIN_CHALLENGE}));
    }

    #[test]
    fn endpoint_url() {
        assert_eq!(
            Endpoint::Brightness.url("http://192.168.1.60"),
            "http://192.168.1.60/xled/v1/led/out/brightness"
        );
    }

    #[test]
    fn brightness_body_uses_absolute_type() {
        let body = brightness_body(Brightness::new(42).unwrap());
        assert_eq!(body, json!({"mode": "enabled", "type": "A", "value": 42}));
    }

    #[test]
    fn effect_body_sends_both_fields() {
        assert_eq!(effect_body(3), json!({"preset_id": 3, "effect_id": 3}));
    }

    #[test]
    fn verify_body_echoes_response() {
        assert_eq!(verify_body("R"), json!({"challenge-response": "R"}));
    }

    #[test]
    fn mode_and_movie_bodies() {
        assert_eq!(mode_body(LedMode::Playlist), json!({"mode": "playlist"}));
        assert_eq!(movie_body(7), json!({"id": 7}));
        assert_eq!(logout_body(), json!({}));
    }
}
