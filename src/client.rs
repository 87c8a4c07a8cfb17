//! High-level gateway client.
//!
//! [`ShurjopayClient`] composes the session manager, request builder, and
//! transport into the three public gateway operations: payment initiation,
//! order verification, and payment status checks. Every operation first asks
//! the session manager for a valid token (authenticating if none is held or
//! the held one expired), then builds and sends the request and decodes the
//! JSON response into a typed result.

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    models::{PaymentRequest, PaymentResponse, VerifiedOrder},
    request::{OutboundRequest, RequestBuilder},
    session::SessionManager,
    transport::{HttpConfig, HttpTransport, Transport, TransportResponse},
};

/// Minimal inquiry payload for the verification and status endpoints.
///
/// The gateway expects a literal `order_id` key here, unlike the camelCase
/// payment shapes.
#[derive(Serialize)]
struct OrderInquiry<'a> {
    order_id: &'a str,
}

/// Client for the shurjoPay payment gateway.
///
/// One client manages exactly one authenticated session. Operations execute
/// synchronously to completion on the calling task; there is no background
/// token refresh.
///
/// Transport failures during an operation surface as error values rather
/// than absent results; callers that want the legacy treat-as-absent
/// contract can collapse them with [`Result::ok`].
///
/// # Examples
///
/// ```rust,no_run
/// use rust_decimal::Decimal;
/// use shurjopay_client::{GatewayConfig, PaymentRequest, ShurjopayClient};
///
/// # async fn example() -> shurjopay_client::error::Result<()> {
/// let config = GatewayConfig::from_toml(r#"
///     username = "sp_sandbox"
///     password = "pyyk97hu&6u6"
///     callback_url = "https://merchant.example.com/callback"
///     base_url = "https://sandbox.shurjopayment.com"
/// "#)?;
///
/// let client = ShurjopayClient::new(config)?;
///
/// let request = PaymentRequest {
///     prefix: "sp".into(),
///     amount: Decimal::new(101050, 2),
///     order_id: "ord-1".into(),
///     currency: "BDT".into(),
///     customer_name: "A. Rahman".into(),
///     ..Default::default()
/// };
///
/// let response = client.make_payment(request).await?;
/// println!("Checkout at: {}", response.checkout_url);
///
/// let order = client.verify_order(&response.order_id).await?;
/// println!("Status: {:?}", order.transaction_status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ShurjopayClient<T: Transport = HttpTransport> {
    config: GatewayConfig,
    builder: RequestBuilder,
    session: SessionManager,
    transport: T,
}

impl ShurjopayClient<HttpTransport> {
    /// Creates a client with the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the configuration fails
    /// validation.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?)
    }

    /// Creates a client with custom HTTP transport settings.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation or the transport
    /// cannot be built.
    pub fn with_http_config(config: GatewayConfig, http: &HttpConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::with_config(http)?)
    }
}

impl<T: Transport> ShurjopayClient<T> {
    /// Creates a client over an explicit transport.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the configuration fails
    /// validation.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let builder = RequestBuilder::new(config.base_url_trimmed());
        let session = SessionManager::new(&config);

        Ok(Self { config, builder, session, transport })
    }

    /// Initiates a payment.
    ///
    /// Injects the configured callback URL as both return and cancel URL,
    /// plus the current session token and store id, into the request,
    /// overwriting any caller-supplied values for those fields. The token
    /// travels in the request body for this one call, not in a header.
    ///
    /// Returns the gateway's payment response, which carries the hosted
    /// checkout URL and the order id used for later verification.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Authentication` / `GatewayError::Configuration`
    /// if a valid token cannot be obtained, `GatewayError::Http` /
    /// `GatewayError::Transport` if the payment call fails, and
    /// `GatewayError::Protocol` if the response cannot be decoded.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn make_payment(&self, mut request: PaymentRequest) -> Result<PaymentResponse> {
        info!("initiating payment");

        let token = self.session.ensure_valid_token(&self.transport).await?;

        request.return_url = self.config.callback_url.clone();
        request.cancel_url = self.config.callback_url.clone();
        request.auth_token = token.token.clone();
        request.store_id = token.store_id.clone();

        let outbound = self.builder.post_json(self.config.endpoints.payment(), &request)?;
        let response = self.send("payment", &outbound).await?;

        serde_json::from_slice(&response.body).map_err(|e| {
            error!(error = %e, "payment response could not be decoded");
            GatewayError::Protocol(format!("failed to parse payment response: {e}"))
        })
    }

    /// Verifies an order by the gateway-assigned order id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`make_payment`](Self::make_payment); additionally
    /// returns `GatewayError::Protocol` when the gateway responds with an
    /// empty array instead of a singleton result.
    #[instrument(skip(self))]
    pub async fn verify_order(&self, order_id: &str) -> Result<VerifiedOrder> {
        info!("verifying order");
        self.query_order("verification", self.config.endpoints.verification(), order_id).await
    }

    /// Checks the payment status of an order by the gateway-assigned id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`verify_order`](Self::verify_order).
    #[instrument(skip(self))]
    pub async fn check_payment_status(&self, order_id: &str) -> Result<VerifiedOrder> {
        info!("checking payment status");
        self.query_order("status", self.config.endpoints.status(), order_id).await
    }

    /// Shared template for the verification and status operations.
    ///
    /// The gateway wraps the order record in a singleton array; only the
    /// first element is surfaced. That quirk is preserved for wire
    /// compatibility.
    async fn query_order(
        &self,
        operation: &'static str,
        path: &str,
        order_id: &str,
    ) -> Result<VerifiedOrder> {
        let token = self.session.ensure_valid_token(&self.transport).await?;

        let inquiry = OrderInquiry { order_id };
        let outbound = self.builder.post_json_authorized(path, &inquiry, &token)?;
        let response = self.send(operation, &outbound).await?;

        let orders: Vec<VerifiedOrder> = serde_json::from_slice(&response.body).map_err(|e| {
            error!(operation, error = %e, "order response could not be decoded");
            GatewayError::Protocol(format!("failed to parse order response: {e}"))
        })?;

        orders.into_iter().next().ok_or_else(|| {
            GatewayError::Protocol("gateway returned an empty result set".to_owned())
        })
    }

    /// Sends a request, logging transport failures at the operation boundary.
    async fn send(
        &self,
        operation: &'static str,
        request: &OutboundRequest,
    ) -> Result<TransportResponse> {
        match self.transport.post(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(operation, error = %e, "gateway request failed");
                Err(e)
            }
        }
    }
}
