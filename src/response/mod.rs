// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for Twinkly endpoints.
//!
//! Every response also carries a numeric `code` field; it is ignored here
//! because the device reports failures as failed HTTP exchanges.

mod auth;
mod led;

pub use auth::LoginResponse;
pub use led::{BrightnessResponse, EffectResponse, ModeResponse, MovieResponse};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;

/// Decodes a JSON body into a typed response.
///
/// # Errors
///
/// Returns `ParseError::Json` if a required field is missing or has the
/// wrong type.
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T, ParseError> {
    serde_json::from_value(value).map_err(ParseError::from)
}
