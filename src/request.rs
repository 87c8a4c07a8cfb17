//! Outbound request construction.
//!
//! This module separates request assembly from protocol mechanics: the
//! builder produces a plain-data [`OutboundRequest`] (absolute URL, headers,
//! serialized JSON body) which a [`Transport`](crate::transport::Transport)
//! implementation then executes. The builder never mutates payloads; field
//! injection into a payment request happens in the client operation before
//! the builder is invoked.

use serde::Serialize;

use crate::{
    error::{GatewayError, Result},
    models::SessionToken,
};

/// A fully-formed outbound POST request.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Absolute request URL.
    pub url: String,
    /// HTTP headers to include.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Vec<u8>,
}

/// Builds outbound JSON POST requests against a fixed base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
}

impl RequestBuilder {
    /// Creates a builder targeting the given base URL.
    ///
    /// A trailing slash on the base URL is ignored; endpoint paths carry the
    /// leading slash.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Builds an unauthenticated JSON POST to `base_url + path`.
    ///
    /// Sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Protocol` if the payload cannot be serialized.
    pub fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> Result<OutboundRequest> {
        let body = serde_json::to_vec(payload).map_err(|e| {
            GatewayError::Protocol(format!("request body serialization failed: {e}"))
        })?;

        Ok(OutboundRequest {
            url: format!("{}{path}", self.base_url),
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body,
        })
    }

    /// Builds an authenticated JSON POST to `base_url + path`.
    ///
    /// Same as [`post_json`](Self::post_json) plus an
    /// `Authorization: "<tokenType> <token>"` header.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Protocol` if the payload cannot be serialized.
    pub fn post_json_authorized<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
        token: &SessionToken,
    ) -> Result<OutboundRequest> {
        let mut request = self.post_json(path, payload)?;
        request.headers.push(("Authorization".to_owned(), token.authorization_header()));
        Ok(request)
    }
}
