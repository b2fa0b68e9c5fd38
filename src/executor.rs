// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated request execution with one recovery attempt.
//!
//! A token can be revoked by the device at any time, for instance when
//! another client logs in, and the device reports that the same way it
//! reports an unreachable endpoint. Every failed request is therefore
//! followed by exactly one re-login and one retry.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::command::Endpoint;
use crate::error::{Error, ProtocolError};
use crate::protocol::{Method, Request, Transport};
use crate::session::SessionManager;

/// Runs `attempt` with `input`; if it fails, hands the input and the error
/// to `recover` to obtain a fresh input and runs `attempt` once more.
///
/// A failing recovery is returned as is. The second attempt's error is
/// returned unchanged.
pub(crate) async fn retry_once<I, O, A, AFut, R, RFut>(
    input: I,
    attempt: A,
    recover: R,
) -> Result<O, Error>
where
    A: Fn(&I) -> AFut,
    AFut: Future<Output = Result<O, ProtocolError>>,
    R: FnOnce(I, ProtocolError) -> RFut,
    RFut: Future<Output = Result<I, Error>>,
{
    let first = match attempt(&input).await {
        Ok(output) => return Ok(output),
        Err(error) => error,
    };
    let input = recover(input, first).await?;
    attempt(&input).await.map_err(Error::Protocol)
}

/// Sends authenticated requests on behalf of the device facade.
pub struct Executor<T> {
    transport: Arc<T>,
    session: Arc<SessionManager<T>>,
}

impl<T: Transport> Executor<T> {
    /// Creates an executor sharing `session`'s transport.
    #[must_use]
    pub fn new(transport: Arc<T>, session: Arc<SessionManager<T>>) -> Self {
        Self { transport, session }
    }

    /// Returns the session this executor authenticates with.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager<T>> {
        &self.session
    }

    /// Executes one request against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if no session can be established, or if the request
    /// fails both before and after re-authentication.
    pub async fn execute(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, Error> {
        let mut request = Request::new(method, endpoint.url(self.session.base_url()));
        request.body = body;

        let token = self.session.ensure_valid_session().await?;

        retry_once(
            token,
            |token: &String| self.transport.send(request.clone().with_token(token.as_str())),
            |token, error| self.reauthenticate(endpoint, method, token, error),
        )
        .await
    }

    async fn reauthenticate(
        &self,
        endpoint: Endpoint,
        method: Method,
        rejected: String,
        error: ProtocolError,
    ) -> Result<String, Error> {
        tracing::debug!(%endpoint, %method, error = %error, "Request failed, re-authenticating");
        // A concurrent caller may already have replaced the rejected token.
        self.session.invalidate_token(&rejected).await;
        self.session.ensure_valid_session().await.inspect_err(|e| {
            tracing::error!(%endpoint, error = %e, "Re-authentication failed");
        })
    }
}

impl<T> std::fmt::Debug for Executor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
