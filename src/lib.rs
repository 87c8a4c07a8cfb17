//! shurjoPay Client: Payment Gateway Integration for Rust
//!
//! A Rust client library for the shurjoPay payment gateway: it
//! authenticates, initiates payments, and verifies/queries order status over
//! HTTPS/JSON. The core of the library is the authenticated-session
//! lifecycle: acquiring a bearer token, detecting its expiry, transparently
//! refreshing it, and guaranteeing every outbound request carries a valid
//! token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Merchant backend   │  your application
//! └─────────┬───────────┘
//!           │
//! ┌─────────▼──────────────────────────────────────┐
//! │        ShurjopayClient (this crate)            │
//! │  ┌────────────────┐     ┌──────────────────┐   │
//! │  │ SessionManager │─────│  RequestBuilder  │   │
//! │  │ (token expiry, │     │  (JSON bodies,   │   │
//! │  │  refresh)      │     │   auth headers)  │   │
//! │  └────────────────┘     └──────────────────┘   │
//! └─────────┬──────────────────────────────────────┘
//!           │ HTTPS POST (Transport)
//! ┌─────────▼───────────┐
//! │  shurjoPay gateway  │  token / payment / verification / status
//! └─────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_decimal::Decimal;
//! use shurjopay_client::{GatewayConfig, PaymentRequest, ShurjopayClient};
//!
//! # async fn example() -> shurjopay_client::error::Result<()> {
//! let config = GatewayConfig::from_toml(r#"
//!     username = "sp_sandbox"
//!     password = "pyyk97hu&6u6"
//!     callback_url = "https://merchant.example.com/callback"
//!     base_url = "https://sandbox.shurjopayment.com"
//! "#)?;
//!
//! let client = ShurjopayClient::new(config)?;
//!
//! // Initiate a payment. The client injects the callback URL, session
//! // token, and store id before the request is serialized.
//! let response = client.make_payment(PaymentRequest {
//!     prefix: "sp".into(),
//!     amount: Decimal::new(101050, 2),
//!     order_id: "ord-1".into(),
//!     currency: "BDT".into(),
//!     customer_name: "A. Rahman".into(),
//!     ..Default::default()
//! }).await?;
//!
//! println!("Redirect customer to: {}", response.checkout_url);
//!
//! // Later: verify the order and check its payment status.
//! let order = client.verify_order(&response.order_id).await?;
//! println!("Bank status: {:?}", order.bank_status);
//!
//! let status = client.check_payment_status(&response.order_id).await?;
//! println!("Transaction status: {:?}", status.transaction_status);
//! # Ok(())
//! # }
//! ```
//!
//! # Session Lifecycle
//!
//! Each client owns exactly one session. The first operation triggers one
//! authentication call; subsequent operations reuse the held token until its
//! server-declared lifetime elapses, at which point the next operation
//! transparently re-authenticates and replaces the token wholesale. A token
//! exactly at its lifetime boundary counts as expired. Concurrent callers
//! sharing one client are serialized through the session's internal mutex,
//! so there are no redundant authentication calls and no half-replaced tokens.
//!
//! # Module Organization
//!
//! - [`client`]: the public gateway operations
//! - [`session`]: token ownership, expiry, and the authentication exchange
//! - [`request`]: outbound request construction
//! - [`transport`]: HTTP mechanics behind a sealed trait
//! - [`config`]: TOML merchant configuration with validation
//! - [`models`]: wire data shapes
//! - [`error`]: error taxonomy
//!
//! # Error Handling
//!
//! All operations return [`Result<T, GatewayError>`](error::Result).
//! Authentication and configuration errors mean the call cannot possibly
//! succeed. Transport failures surface as distinguishable error values;
//! the legacy treat-as-absent contract is one `.ok()` away:
//!
//! ```rust,no_run
//! # use shurjopay_client::{GatewayError, ShurjopayClient};
//! # async fn example(client: ShurjopayClient) {
//! match client.verify_order("sp-ord-42").await {
//!     Ok(order) => println!("verified: {}", order.order_id),
//!     Err(GatewayError::Authentication(msg)) => eprintln!("cannot authenticate: {msg}"),
//!     Err(e) if e.is_transport() => eprintln!("could not reach the gateway: {e}"),
//!     Err(e) => eprintln!("gateway error: {e}"),
//! }
//! # }
//! ```
//!
//! There are no automatic retries anywhere; a single failed network call is
//! not retried. Callers needing deadlines or retries must wrap operations
//! externally.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod session;
pub mod transport;

pub use client::ShurjopayClient;
pub use config::{EndpointConfig, GatewayConfig};
pub use error::{GatewayError, Result};
pub use models::{PaymentRequest, PaymentResponse, SessionToken, VerifiedOrder};
pub use session::SessionManager;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<GatewayError>;
    }
}
