// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED state responses.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{Brightness, LedMode};

/// Response from the mode endpoint, e.g. `{"mode": "movie", "code": 1000}`.
///
/// ```
/// use twinkly_lib::response::ModeResponse;
/// use twinkly_lib::types::LedMode;
///
/// let response: ModeResponse = serde_json::from_str(r#"{"mode": "movie"}"#).unwrap();
/// assert_eq!(response.mode().unwrap(), LedMode::Movie);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModeResponse {
    mode: String,
}

impl ModeResponse {
    /// Returns the raw mode string reported by the device.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.mode
    }

    /// Returns the parsed mode.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` for a mode outside the known set.
    pub fn mode(&self) -> Result<LedMode, ParseError> {
        self.mode
            .parse()
            .map_err(|e: crate::error::ValueError| ParseError::InvalidValue {
                field: "mode".to_string(),
                message: e.to_string(),
            })
    }
}

/// Response from the brightness endpoint,
/// e.g. `{"mode": "enabled", "value": 42}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BrightnessResponse {
    value: i64,
}

impl BrightnessResponse {
    /// Returns the brightness.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the device reports a value
    /// outside 0-100.
    pub fn brightness(&self) -> Result<Brightness, ParseError> {
        Brightness::from_i64(self.value).map_err(|e| ParseError::InvalidValue {
            field: "value".to_string(),
            message: e.to_string(),
        })
    }
}

/// Response from the current effect endpoint.
///
/// Depending on firmware the index is reported as `preset_id` or
/// `effect_id`; `preset_id` wins when both are present.
///
/// ```
/// use twinkly_lib::response::EffectResponse;
///
/// let preset: EffectResponse = serde_json::from_str(r#"{"preset_id": 3}"#).unwrap();
/// assert_eq!(preset.index().unwrap(), 3);
///
/// let effect: EffectResponse = serde_json::from_str(r#"{"effect_id": 5}"#).unwrap();
/// assert_eq!(effect.index().unwrap(), 5);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EffectResponse {
    #[serde(default)]
    preset_id: Option<u32>,
    #[serde(default)]
    effect_id: Option<u32>,
}

impl EffectResponse {
    /// Returns the current effect index.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if neither field is present.
    pub fn index(&self) -> Result<u32, ParseError> {
        self.preset_id
            .or(self.effect_id)
            .ok_or_else(|| ParseError::MissingField("preset_id or effect_id".to_string()))
    }
}

/// Response from the current movie endpoint, e.g. `{"id": 2}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieResponse {
    id: u32,
}

impl MovieResponse {
    /// Returns the current movie id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }
}
