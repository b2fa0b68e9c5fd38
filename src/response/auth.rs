// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use std::time::Duration;

use serde::Deserialize;

/// Response from the login endpoint.
///
/// ```
/// use twinkly_lib::response::LoginResponse;
///
/// let json = r#"{
///     "authentication_token": "T1",
///     "challenge-response": "R",
///     "authentication_token_expires_in": 14400,
///     "code": 1000
/// }"#;
/// let response: LoginResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.token(), "T1");
/// assert_eq!(response.challenge_response(), "R");
/// assert_eq!(response.expires_in().as_secs(), 14400);
/// ```
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    authentication_token: String,
    #[serde(rename = "challenge-response")]
    challenge_response: String,
    authentication_token_expires_in: u64,
}

impl LoginResponse {
    /// Returns the unverified token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.authentication_token
    }

    /// Returns the value to echo back in the verify request.
    #[must_use]
    pub fn challenge_response(&self) -> &str {
        &self.challenge_response
    }

    /// Returns how long the token stays valid after verification.
    #[must_use]
    pub fn expires_in(&self) -> Duration {
        Duration::from_secs(self.authentication_token_expires_in)
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("expires_in", &self.authentication_token_expires_in)
            .finish_non_exhaustive()
    }
}
