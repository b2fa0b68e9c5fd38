// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory device used by unit tests.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::command::Endpoint;
use crate::error::ProtocolError;
use crate::protocol::{Method, Request, Transport};

/// Fake Twinkly device implementing the login/verify handshake and the
/// LED endpoints, with failure injection.
#[derive(Debug)]
pub(crate) struct FakeDevice {
    inner: Mutex<FakeState>,
    latency: Duration,
}

#[derive(Debug)]
struct FakeState {
    requests: Vec<Request>,
    issued: u32,
    pending: Option<(String, String)>,
    valid_token: Option<String>,
    expires_in: u64,
    mode: String,
    brightness: i64,
    effect: i64,
    effect_field: &'static str,
    movie: i64,
    failures: HashMap<Endpoint, usize>,
}

impl FakeDevice {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(FakeState {
                requests: Vec::new(),
                issued: 0,
                pending: None,
                valid_token: None,
                expires_in: 14_400,
                mode: "movie".to_string(),
                brightness: 100,
                effect: 0,
                effect_field: "effect_id",
                movie: 0,
                failures: HashMap::new(),
            }),
            latency: Duration::ZERO,
        }
    }

    /// Every request waits this long before being answered.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn with_expires_in(self, secs: u64) -> Self {
        self.inner.lock().expires_in = secs;
        self
    }

    pub(crate) fn with_mode(self, mode: &str) -> Self {
        self.inner.lock().mode = mode.to_string();
        self
    }

    /// Reports the current effect under `preset_id` instead of `effect_id`.
    pub(crate) fn reporting_preset_id(self) -> Self {
        self.inner.lock().effect_field = "preset_id";
        self
    }

    /// Makes the next `times` requests to `endpoint` fail.
    pub(crate) fn fail(&self, endpoint: Endpoint, times: usize) {
        self.inner.lock().failures.insert(endpoint, times);
    }

    /// Drops the current token, as if another client had logged in.
    pub(crate) fn revoke_token(&self) {
        self.inner.lock().valid_token = None;
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.inner.lock().requests.clone()
    }

    pub(crate) fn count(&self, endpoint: Endpoint) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| r.url.ends_with(endpoint.path()))
            .count()
    }

    pub(crate) fn count_method(&self, endpoint: Endpoint, method: Method) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| r.url.ends_with(endpoint.path()) && r.method == method)
            .count()
    }

    fn handle(&self, request: &Request) -> Result<Value, ProtocolError> {
        let mut state = self.inner.lock();
        state.requests.push(request.clone());

        let endpoint = Endpoint::ALL
            .into_iter()
            .find(|e| request.url.ends_with(e.path()))
            .ok_or_else(|| ProtocolError::ConnectionFailed("HTTP 404 - Not Found".to_string()))?;

        if let Some(remaining) = state.failures.get_mut(&endpoint)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(ProtocolError::ConnectionFailed(
                "HTTP 503 - Service Unavailable".to_string(),
            ));
        }

        let body = request.body.clone().unwrap_or(Value::Null);

        match endpoint {
            Endpoint::Login => {
                state.issued += 1;
                let token = format!("T{}", state.issued);
                let challenge_response = format!("R{}", state.issued);
                state.pending = Some((token.clone(), challenge_response.clone()));
                Ok(json!({
                    "authentication_token": token,
                    "challenge-response": challenge_response,
                    "authentication_token_expires_in": state.expires_in,
                    "code": 1000
                }))
            }
            Endpoint::Verify => {
                let matches = state.pending.as_ref().is_some_and(|(token, response)| {
                    request.token.as_ref() == Some(token) && body["challenge-response"] == *response
                });
                if !matches {
                    return Err(ProtocolError::AuthenticationFailed);
                }
                let verified = state.pending.take().map(|(token, _)| token);
                state.valid_token = verified;
                Ok(json!({"code": 1000}))
            }
            _ if request.token.is_none() || request.token != state.valid_token => {
                Err(ProtocolError::AuthenticationFailed)
            }
            Endpoint::Logout => {
                state.valid_token = None;
                Ok(json!({"code": 1000}))
            }
            Endpoint::Mode => match request.method {
                Method::Get => Ok(json!({"mode": state.mode, "code": 1000})),
                Method::Post => {
                    state.mode = body["mode"].as_str().unwrap_or_default().to_string();
                    Ok(json!({"code": 1000}))
                }
            },
            Endpoint::Brightness => match request.method {
                Method::Get => Ok(json!({"mode": "enabled", "value": state.brightness, "code": 1000})),
                Method::Post => {
                    state.brightness = body["value"].as_i64().unwrap_or_default();
                    Ok(json!({"code": 1000}))
                }
            },
            Endpoint::CurrentEffect => match request.method {
                Method::Get => {
                    let mut response = json!({"code": 1000});
                    response[state.effect_field] = json!(state.effect);
                    Ok(response)
                }
                Method::Post => {
                    state.effect = body["preset_id"].as_i64().unwrap_or_default();
                    Ok(json!({"code": 1000}))
                }
            },
            Endpoint::CurrentMovie => match request.method {
                Method::Get => Ok(json!({"id": state.movie, "code": 1000})),
                Method::Post => {
                    state.movie = body["id"].as_i64().unwrap_or_default();
                    Ok(json!({"code": 1000}))
                }
            },
        }
    }
}

impl Transport for FakeDevice {
    async fn send(&self, request: Request) -> Result<Value, ProtocolError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.handle(&request)
    }
}
