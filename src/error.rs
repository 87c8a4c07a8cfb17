//! Error types for the shurjoPay client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Authentication** ([`GatewayError::Authentication`]): credential or
//!   token-acquisition failures
//! - **Configuration** ([`GatewayError::Configuration`]): missing or invalid
//!   configuration values, including an unparsable server timestamp
//! - **Network** ([`GatewayError::Http`], [`GatewayError::Transport`]):
//!   HTTP communication failures
//! - **Protocol** ([`GatewayError::Protocol`]): gateway responses that
//!   violate the expected JSON shape
//!
//! # Examples
//!
//! ```
//! use shurjopay_client::error::{GatewayError, Result};
//!
//! fn require_key(key: &str, value: &str) -> Result<String> {
//!     if value.is_empty() {
//!         return Err(GatewayError::Configuration(format!("{key} must not be empty")));
//!     }
//!     Ok(value.to_string())
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to the shurjoPay gateway.
///
/// Authentication and configuration errors indicate the call cannot possibly
/// succeed and always surface to the caller. Transport-level failures during
/// payment, verification, or status calls also surface as error values;
/// callers that want the legacy treat-as-absent contract can collapse them
/// with [`Result::ok`] (see [`GatewayError::is_transport`]).
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Authentication with the gateway failed.
    ///
    /// Raised for invalid credentials, an unreachable token endpoint, a
    /// non-success status in the token response, or credentials missing from
    /// configuration. No usable token is installed when this is returned.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A configuration value is missing or invalid.
    ///
    /// Also raised when the server-supplied token creation timestamp does not
    /// match the fixed `yyyy-MM-dd hh:mm:ssAM/PM` format. That value is not
    /// user input, so a parse failure points at configuration or a gateway
    /// contract change rather than at the caller.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refused, DNS failures,
    /// TLS errors. The client performs no retries; callers needing them must
    /// wrap operations externally.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-level validation or status failure.
    ///
    /// Raised for invalid gateway URLs (non-HTTPS, localhost) and for
    /// non-success HTTP status codes from the gateway.
    #[error("transport error: {0}")]
    Transport(String),

    /// Gateway response (or outbound payload) violates the expected shape.
    ///
    /// Includes the verification/status case where the gateway returns an
    /// empty array instead of a singleton result.
    #[error("unexpected gateway response: {0}")]
    Protocol(String),
}

impl GatewayError {
    /// Returns true for failures of the "we couldn't ask" kind.
    ///
    /// These are the cases the legacy contract collapsed into an absent
    /// result; callers preserving that contract match on this.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Transport(_))
    }
}
