//! Authenticated-session lifecycle.
//!
//! This module owns the bearer token issued by the gateway's token endpoint.
//! [`SessionManager`] guarantees that every authenticated call uses a
//! non-expired token, fetching a new one only when none is held or the held
//! one has expired. The token is replaced wholesale on refresh, never
//! mutated field-by-field.
//!
//! # Expiry
//!
//! The token endpoint reports the creation instant as a wall-clock string in
//! a fixed `yyyy-MM-dd hh:mm:ssAM/PM` format together with a lifetime in
//! seconds. A token is expired once the elapsed seconds reach the lifetime
//! (boundary inclusive). Clock skew between client and gateway is accepted,
//! not compensated.
//!
//! # Concurrency
//!
//! The held token sits behind an async mutex, and the lock is held across
//! the whole check-expiry/maybe-refresh/read sequence, including the
//! authenticate network call. Concurrent callers sharing one manager never
//! race into redundant authentications or observe a half-replaced token.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    models::SessionToken,
    request::RequestBuilder,
    transport::Transport,
};

/// Fixed format of the server-supplied token creation timestamp.
///
/// AM/PM parsing is case-insensitive; digits are locale-independent.
pub(crate) const TOKEN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S%p";

/// Credentials payload for the token endpoint.
#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Owns the current session token and the authentication exchange.
///
/// Exactly one token is active per manager instance.
/// [`ensure_valid_token`](Self::ensure_valid_token) is the only mutation
/// entry point.
pub struct SessionManager {
    username: String,
    password: String,
    token_path: String,
    builder: RequestBuilder,
    current: Mutex<Option<SessionToken>>,
}

// Credentials must not leak through Debug output.
impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token_path", &self.token_path)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager for the given gateway configuration.
    ///
    /// No network activity happens here; the first token is fetched lazily
    /// by [`ensure_valid_token`](Self::ensure_valid_token).
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            token_path: config.endpoints.token().to_owned(),
            builder: RequestBuilder::new(config.base_url_trimmed()),
            current: Mutex::new(None),
        }
    }

    /// Returns a non-expired token, authenticating only when needed.
    ///
    /// If no token has ever been obtained, or the held token is expired,
    /// performs the authentication exchange and replaces the held token;
    /// otherwise returns the held token unchanged.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Authentication` if credentials are missing,
    /// the token endpoint is unreachable, or the gateway rejects the
    /// credentials; `GatewayError::Configuration` if the held token carries
    /// an unparsable creation timestamp.
    pub async fn ensure_valid_token<T: Transport>(&self, transport: &T) -> Result<SessionToken> {
        let mut held = self.current.lock().await;

        if let Some(token) = held.as_ref()
            && !is_expired(token)?
        {
            return Ok(token.clone());
        }

        let token = self.authenticate(transport).await?;
        *held = Some(token.clone());
        Ok(token)
    }

    /// Performs the authentication exchange.
    ///
    /// On failure no state is retained; the manager conceptually reverts to
    /// holding no token.
    #[instrument(skip(self, transport))]
    async fn authenticate<T: Transport>(&self, transport: &T) -> Result<SessionToken> {
        if self.username.is_empty() || self.password.is_empty() {
            error!("credentials are missing from configuration");
            return Err(GatewayError::Authentication(
                "username and password must be configured".to_owned(),
            ));
        }

        let credentials = TokenRequest { username: &self.username, password: &self.password };
        let request = self.builder.post_json(&self.token_path, &credentials)?;

        let response = match transport.post(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "token endpoint unreachable");
                return Err(GatewayError::Authentication(format!(
                    "token endpoint unreachable: {e}"
                )));
            }
        };

        let token: SessionToken = serde_json::from_slice(&response.body).map_err(|e| {
            GatewayError::Protocol(format!("failed to parse token response: {e}"))
        })?;

        if !token.granted() {
            error!(message = %token.message, "gateway rejected credentials");
            return Err(GatewayError::Authentication(
                "invalid username or password".to_owned(),
            ));
        }

        info!("authentication token issued");
        Ok(token)
    }
}

/// Returns true if the token's lifetime has elapsed.
fn is_expired(token: &SessionToken) -> Result<bool> {
    is_expired_at(token, Local::now().naive_local())
}

/// Expiry check against an explicit clock reading.
fn is_expired_at(token: &SessionToken, now: NaiveDateTime) -> Result<bool> {
    let created_at = parse_create_time(token)?;
    let elapsed = now.signed_duration_since(created_at).num_seconds();
    Ok(elapsed >= token.expires_in)
}

/// Parses the server-supplied creation timestamp.
fn parse_create_time(token: &SessionToken) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&token.create_time, TOKEN_TIMESTAMP_FORMAT).map_err(|e| {
        GatewayError::Configuration(format!(
            "unparsable token creation timestamp '{}': {e}",
            token.create_time
        ))
    })
}
