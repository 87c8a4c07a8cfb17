//! Gateway configuration types.
//!
//! This module defines TOML-deserializable configuration for a shurjoPay
//! merchant account: credentials, callback URL, API base URL, and optional
//! per-operation endpoint path overrides.

use std::fmt;

use serde::Deserialize;
use tracing::error;
use url::Url;

use crate::error::{GatewayError, Result};

/// Default endpoint path for token acquisition.
const DEFAULT_TOKEN_ENDPOINT: &str = "/api/get_token";
/// Default endpoint path for payment initiation.
const DEFAULT_PAYMENT_ENDPOINT: &str = "/api/secret-pay";
/// Default endpoint path for order verification.
const DEFAULT_VERIFICATION_ENDPOINT: &str = "/api/verification";
/// Default endpoint path for payment status checks.
const DEFAULT_STATUS_ENDPOINT: &str = "/api/payment-status";

/// Root gateway configuration.
///
/// # Examples
///
/// ```
/// use shurjopay_client::GatewayConfig;
///
/// let toml = r#"
///     username = "sp_sandbox"
///     password = "pyyk97hu&6u6"
///     callback_url = "https://merchant.example.com/callback"
///     base_url = "https://sandbox.shurjopayment.com"
/// "#;
///
/// let config = GatewayConfig::from_toml(toml).unwrap();
/// assert_eq!(config.base_url, "https://sandbox.shurjopayment.com");
/// ```
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant account username.
    pub username: String,

    /// Merchant account password.
    pub password: String,

    /// Merchant callback URL, used as both return and cancel URL on
    /// payment initiation.
    pub callback_url: String,

    /// Base URL for the gateway API.
    pub base_url: String,

    /// Endpoint path overrides.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

// Credentials must not leak through Debug output.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("base_url", &self.base_url)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl GatewayConfig {
    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the document is not valid
    /// TOML or required keys are absent.
    pub fn from_toml(document: &str) -> Result<Self> {
        toml::from_str(document)
            .map_err(|e| GatewayError::Configuration(format!("invalid configuration: {e}")))
    }

    /// Validates the configuration.
    ///
    /// This method checks that:
    /// - `username`, `password`, `callback_url`, and `base_url` are non-empty
    /// - `base_url` and `callback_url` are HTTPS and not localhost/loopback
    /// - endpoint path overrides are well-formed (leading `/`, no traversal
    ///   sequences)
    ///
    /// Each missing required value is logged with the offending key name.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if any validation fails.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("username", &self.username),
            ("password", &self.password),
            ("callback_url", &self.callback_url),
            ("base_url", &self.base_url),
        ];

        for (key, value) in required {
            if value.is_empty() {
                error!(key, "required configuration value is missing");
                return Err(GatewayError::Configuration(format!(
                    "{key} value shouldn't be empty"
                )));
            }
        }

        validate_gateway_url("base_url", &self.base_url)?;
        validate_gateway_url("callback_url", &self.callback_url)?;
        self.endpoints.validate()?;

        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Validates a gateway URL for scheme and host constraints.
fn validate_gateway_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| GatewayError::Configuration(format!("invalid {key} '{value}': {e}")))?;

    if url.scheme() != "https" {
        return Err(GatewayError::Configuration(format!(
            "{key} must use HTTPS, got: {}",
            url.scheme()
        )));
    }

    if let Some(host) = url.host_str() {
        let host_lower = host.to_lowercase();
        if host_lower == "localhost"
            || host_lower == "::1"
            || host_lower == "[::1]"
            || host_lower.starts_with("127.")
        {
            return Err(GatewayError::Configuration(format!(
                "{key} must not be localhost or loopback: {host}"
            )));
        }
    }

    Ok(())
}

/// Endpoint path overrides.
///
/// Every accessor falls back to the gateway's published default path when no
/// override is configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    /// Token acquisition endpoint (default: "/api/get_token").
    pub token: Option<String>,

    /// Payment initiation endpoint (default: "/api/secret-pay").
    pub payment: Option<String>,

    /// Order verification endpoint (default: "/api/verification").
    pub verification: Option<String>,

    /// Payment status endpoint (default: "/api/payment-status").
    pub status: Option<String>,
}

impl EndpointConfig {
    /// Token acquisition path.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or(DEFAULT_TOKEN_ENDPOINT)
    }

    /// Payment initiation path.
    #[must_use]
    pub fn payment(&self) -> &str {
        self.payment.as_deref().unwrap_or(DEFAULT_PAYMENT_ENDPOINT)
    }

    /// Order verification path.
    #[must_use]
    pub fn verification(&self) -> &str {
        self.verification.as_deref().unwrap_or(DEFAULT_VERIFICATION_ENDPOINT)
    }

    /// Payment status path.
    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS_ENDPOINT)
    }

    /// Validates endpoint path overrides.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if any endpoint is invalid.
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("token", &self.token),
            ("payment", &self.payment),
            ("verification", &self.verification),
            ("status", &self.status),
        ];

        for (name, endpoint) in endpoints {
            if let Some(path) = endpoint {
                validate_endpoint_path(name, path)?;
            }
        }

        Ok(())
    }
}

/// Validates an endpoint path for hygiene issues.
pub(crate) fn validate_endpoint_path(name: &str, path: &str) -> Result<()> {
    if path.contains("..") {
        return Err(GatewayError::Configuration(format!(
            "endpoint '{name}' contains path traversal sequence '..': {path}"
        )));
    }

    if path.contains("//") {
        return Err(GatewayError::Configuration(format!(
            "endpoint '{name}' contains double slash '//': {path}"
        )));
    }

    if !path.starts_with('/') {
        return Err(GatewayError::Configuration(format!(
            "endpoint '{name}' must start with '/': {path}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_toml() -> &'static str {
        r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"
        "#
    }

    #[test]
    fn test_config_from_toml() {
        let config = GatewayConfig::from_toml(valid_toml()).unwrap();
        assert_eq!(config.username, "sp_user");
        assert_eq!(config.password, "sp_pass");
        assert_eq!(config.callback_url, "https://merchant.example.com/callback");
        assert_eq!(config.base_url, "https://sandbox.shurjopayment.com");
    }

    #[test]
    fn test_config_default_endpoints() {
        let config = GatewayConfig::from_toml(valid_toml()).unwrap();
        assert_eq!(config.endpoints.token(), "/api/get_token");
        assert_eq!(config.endpoints.payment(), "/api/secret-pay");
        assert_eq!(config.endpoints.verification(), "/api/verification");
        assert_eq!(config.endpoints.status(), "/api/payment-status");
    }

    #[test]
    fn test_config_endpoint_overrides() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://engine.shurjopayment.com"

            [endpoints]
            token = "/api/v2/get_token"
            payment = "/api/v2/secret-pay"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.endpoints.token(), "/api/v2/get_token");
        assert_eq!(config.endpoints.payment(), "/api/v2/secret-pay");
        // Unset overrides keep defaults
        assert_eq!(config.endpoints.verification(), "/api/verification");
        assert_eq!(config.endpoints.status(), "/api/payment-status");
    }

    #[test]
    fn test_config_missing_required_key() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            base_url = "https://sandbox.shurjopayment.com"
        "#;

        let result = GatewayConfig::from_toml(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = GatewayConfig::from_toml(valid_toml()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_username_rejected() {
        let toml = r#"
            username = ""
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_validate_empty_password_rejected() {
        let toml = r#"
            username = "sp_user"
            password = ""
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_validate_http_base_url_rejected() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "http://sandbox.shurjopayment.com"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn test_validate_localhost_base_url_rejected() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://localhost/api"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn test_validate_http_callback_url_rejected() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "http://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("callback_url"));
    }

    #[test]
    fn test_validate_traversal_endpoint_rejected() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"

            [endpoints]
            token = "/../etc/passwd"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("path traversal"));
    }

    #[test]
    fn test_validate_endpoint_must_start_with_slash() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com"

            [endpoints]
            payment = "api/secret-pay"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_validate_double_slash_endpoint_rejected() {
        let err = validate_endpoint_path("status", "//evil.com/status").unwrap_err();
        assert!(err.to_string().contains("double slash"));
    }

    #[test]
    fn test_base_url_trimmed() {
        let toml = r#"
            username = "sp_user"
            password = "sp_pass"
            callback_url = "https://merchant.example.com/callback"
            base_url = "https://sandbox.shurjopayment.com/"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.base_url_trimmed(), "https://sandbox.shurjopayment.com");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = GatewayConfig::from_toml(valid_toml()).unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("sp_pass"));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let result = GatewayConfig::from_toml("username = unclosed string");
        assert!(result.is_err());
    }
}
