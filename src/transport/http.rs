//! HTTP transport implementation using reqwest.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::{
    error::{GatewayError, Result},
    request::OutboundRequest,
    transport::{HttpConfig, Transport, TransportResponse, sealed},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Validates a request URL for scheme and host constraints.
///
/// Ensures the URL uses HTTPS and does not point to localhost.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(GatewayError::Transport("Only HTTPS URLs are allowed".to_owned()));
    }

    if let Some(host) = url.host_str()
        && (host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]")
    {
        return Err(GatewayError::Transport("Localhost URLs are not allowed".to_owned()));
    }

    Ok(())
}

/// HTTP transport using reqwest.
///
/// Supports automatic connection pooling and keep-alive. The gateway
/// protocol is POST-only, so this transport executes POST requests
/// exclusively.
///
/// # Examples
///
/// ```rust,no_run
/// use shurjopay_client::transport::{HttpConfig, HttpTransport};
///
/// // Shared pooled client with default settings
/// let transport = HttpTransport::new().unwrap();
///
/// // Custom timeouts
/// let config = HttpConfig { timeout_secs: 60, ..Default::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency.
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates an HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or HTTP client
    /// creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post<'a>(&'a self, request: &'a OutboundRequest) -> Result<TransportResponse> {
        let url = Url::parse(&request.url)
            .map_err(|e| GatewayError::Transport(format!("invalid request URL: {e}")))?;

        validate_url(&url)?;

        let mut outbound = self.client.post(url).body(request.body.clone());
        for (name, value) in &request.headers {
            outbound = outbound.header(name, value);
        }

        let response = outbound.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "gateway returned status {status}"
            )));
        }

        let body = response.bytes().await.map_err(GatewayError::Http)?.to_vec();

        Ok(TransportResponse { status: status.as_u16(), body })
    }

    fn protocol_name(&self) -> &'static str {
        "http"
    }
}
