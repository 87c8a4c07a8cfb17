//! Transport abstraction layer.
//!
//! This module provides a sealed [`Transport`] trait that abstracts the
//! HTTP mechanics away from the gateway operations. The gateway protocol is
//! POST-only, so the trait exposes a single `post` method taking a
//! fully-formed [`OutboundRequest`](crate::request::OutboundRequest).
//!
//! # Architecture
//!
//! The transport layer separates protocol mechanics from request assembly:
//! - **`RequestBuilder`**: produces the request description (URL, headers,
//!   serialized body)
//! - **`Transport`**: executes it and returns the raw response
//!
//! # Examples
//!
//! ```rust,no_run
//! use shurjopay_client::{
//!     request::RequestBuilder,
//!     transport::{HttpTransport, Transport},
//! };
//!
//! # async fn example() -> shurjopay_client::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let builder = RequestBuilder::new("https://sandbox.shurjopayment.com");
//!
//! let request = builder.post_json("/api/get_token", &serde_json::json!({
//!     "username": "sp_sandbox",
//!     "password": "secret",
//! }))?;
//!
//! let response = transport.post(&request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::{error::Result, request::OutboundRequest};

pub mod config;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;
mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Response from a transport operation.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Transport abstraction for gateway calls.
///
/// This trait is sealed: only implementations within this crate are allowed,
/// so every implementation applies the same URL validation and status
/// handling. Test doubles live inside the crate for the same reason.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes a POST request.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid, the HTTP request fails, or the
    /// gateway responds with a non-success status.
    fn post<'a>(
        &'a self,
        request: &'a OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
