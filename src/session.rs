// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication session with a Twinkly device.
//!
//! The device hands out short-lived tokens through a two-step handshake:
//!
//! 1. `POST /login` with a challenge returns an unverified token, a
//!    challenge-response and the token lifetime in seconds.
//! 2. `POST /verify` with the challenge-response, authenticated with the
//!    unverified token, promotes it to a usable token.
//!
//! [`SessionManager`] owns the token and its expiry instant. Every access
//! goes through one async mutex that stays locked for the whole handshake,
//! so a caller arriving while a login is in flight waits for it and then
//! reuses its token instead of starting a second handshake.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::command::{self, Endpoint};
use crate::error::{Error, ProtocolError};
use crate::protocol::{Method, Request, Transport};
use crate::response::{self, LoginResponse};

/// A verified token and the instant it stops being valid.
#[derive(Clone)]
struct ActiveToken {
    token: String,
    expires_at: Instant,
}

impl ActiveToken {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Owner of the authentication token for one device.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use twinkly_lib::protocol::HttpTransport;
/// use twinkly_lib::session::SessionManager;
///
/// # async fn example() -> twinkly_lib::Result<()> {
/// let transport = Arc::new(HttpTransport::new()?);
/// let session = SessionManager::new(transport, "http://192.168.1.60");
///
/// // Logs in on first use, then reuses the token until it expires.
/// let _token = session.ensure_valid_session().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionManager<T> {
    transport: Arc<T>,
    base_url: String,
    current: Mutex<Option<ActiveToken>>,
}

impl<T: Transport> SessionManager<T> {
    /// Creates an unauthenticated session for the device at `base_url`.
    #[must_use]
    pub fn new(transport: Arc<T>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            current: Mutex::new(None),
        }
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a valid token, logging in first if none is held or the held
    /// one has expired.
    ///
    /// An expired token is logged out before the new handshake; a failing
    /// logout is only logged.
    ///
    /// # Errors
    ///
    /// Returns the transport or parse error of the failed handshake step.
    /// The session is left without a token in that case.
    pub async fn ensure_valid_session(&self) -> Result<String, Error> {
        let mut current = self.current.lock().await;

        if let Some(active) = current.as_ref() {
            if !active.is_expired(Instant::now()) {
                return Ok(active.token.clone());
            }
            tracing::debug!(base_url = %self.base_url, "Token expired, renewing session");
        }

        if let Some(stale) = current.take() {
            self.send_logout(&stale.token).await;
        }

        let active = self.login().await?;
        let token = active.token.clone();
        *current = Some(active);
        Ok(token)
    }

    /// Drops the current token without contacting the device.
    pub async fn invalidate(&self) {
        if self.current.lock().await.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "Session invalidated");
        }
    }

    /// Drops the current token only if it is still `token`.
    ///
    /// Returns `false` when another caller already replaced it, in which
    /// case the newer token is kept.
    pub async fn invalidate_token(&self, token: &str) -> bool {
        let mut current = self.current.lock().await;
        if current.as_ref().is_some_and(|active| active.token == token) {
            *current = None;
            tracing::debug!(base_url = %self.base_url, "Rejected token invalidated");
            true
        } else {
            false
        }
    }

    /// Logs out the current token, if any, and clears the session.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn logout(&self) {
        let mut current = self.current.lock().await;
        if let Some(active) = current.take() {
            self.send_logout(&active.token).await;
        }
    }

    /// Returns `true` if a token is held and has not expired yet.
    pub async fn has_token(&self) -> bool {
        self.current
            .lock()
            .await
            .as_ref()
            .is_some_and(|active| !active.is_expired(Instant::now()))
    }

    /// Returns the expiry instant of the held token.
    pub async fn expires_at(&self) -> Option<Instant> {
        self.current.lock().await.as_ref().map(|a| a.expires_at)
    }

    async fn login(&self) -> Result<ActiveToken, Error> {
        let login = Request::new(Method::Post, Endpoint::Login.url(&self.base_url))
            .with_body(command::login_body());

        let body = self.transport.send(login).await.inspect_err(|e| {
            tracing::warn!(base_url = %self.base_url, error = %e, "Login request failed");
        })?;
        let login: LoginResponse = response::parse(body)?;

        // The lifetime comes from the device; an absurd one must not overflow.
        let expires_at = Instant::now()
            .checked_add(login.expires_in())
            .ok_or_else(|| {
                ProtocolError::MalformedResponse(format!(
                    "token lifetime of {}s is out of range",
                    login.expires_in().as_secs()
                ))
            })?;

        tracing::debug!(
            base_url = %self.base_url,
            expires_in = login.expires_in().as_secs(),
            "Received login token, verifying"
        );

        let verify = Request::new(Method::Post, Endpoint::Verify.url(&self.base_url))
            .with_body(command::verify_body(login.challenge_response()))
            .with_token(login.token());

        self.transport.send(verify).await.inspect_err(|e| {
            tracing::warn!(base_url = %self.base_url, error = %e, "Token verification failed");
        })?;

        tracing::info!(base_url = %self.base_url, "Authenticated with device");

        Ok(ActiveToken {
            token: login.token().to_string(),
            expires_at,
        })
    }

    async fn send_logout(&self, token: &str) {
        let request = Request::new(Method::Post, Endpoint::Logout.url(&self.base_url))
            .with_body(command::logout_body())
            .with_token(token);

        match self.transport.send(request).await {
            Ok(_) => tracing::debug!(base_url = %self.base_url, "Logged out"),
            Err(e) => tracing::debug!(base_url = %self.base_url, error = %e, "Error while logging out"),
        }
    }
}

impl<T> std::fmt::Debug for SessionManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
