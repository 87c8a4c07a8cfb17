//! Wire data models for the shurjoPay gateway.
//!
//! This module defines the JSON shapes exchanged with the gateway: the
//! session token issued by the token endpoint, the payment initiation
//! request/response pair, and the verified-order record returned by the
//! verification and status endpoints. The gateway serializes object keys in
//! camelCase; the one exception is the order inquiry payload, which uses a
//! literal `order_id` key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status message the token endpoint returns on a successful grant.
const AUTH_SUCCESS_MESSAGE: &str = "Ok";

/// Bearer session token issued by the token endpoint.
///
/// A token is usable only while [`granted`](Self::granted) is true, and valid
/// only while the elapsed time since `create_time` is below `expires_in`
/// seconds. Tokens are held exclusively by the session manager and replaced
/// wholesale on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    /// Opaque token string.
    pub token: String,
    /// Token type used to build the `Authorization` header (e.g. "Bearer").
    pub token_type: String,
    /// Merchant store identifier, required on payment initiation.
    pub store_id: String,
    /// Server-supplied creation timestamp, fixed `yyyy-MM-dd hh:mm:ssAM/PM`
    /// format.
    pub create_time: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// Grant status indicator; "Ok" on success.
    pub message: String,
}

impl SessionToken {
    /// Returns true if the gateway granted this token.
    #[must_use]
    pub fn granted(&self) -> bool {
        self.message == AUTH_SUCCESS_MESSAGE
    }

    /// Formats the `Authorization` header value: `"<tokenType> <token>"`.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

/// Payment initiation request.
///
/// Callers fill the order and customer fields; the client overwrites
/// `return_url`, `cancel_url`, `auth_token`, and `store_id` from its own
/// configuration and session immediately before serialization, regardless of
/// any caller-supplied values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Merchant order prefix.
    pub prefix: String,
    /// Payment amount.
    pub amount: Decimal,
    /// Merchant-side order identifier.
    pub order_id: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Customer name.
    pub customer_name: String,
    /// Customer street address.
    pub customer_address: String,
    /// Customer city.
    pub customer_city: String,
    /// Customer postal code.
    pub customer_post_code: String,
    /// Customer phone number.
    pub customer_phone: String,
    /// Customer device IP address.
    pub client_ip: String,

    /// Return URL; set by the client from the configured callback URL.
    pub return_url: String,
    /// Cancel URL; set by the client from the configured callback URL.
    pub cancel_url: String,
    /// Session token; set by the client. Carried in the body rather than a
    /// header for this one call.
    pub auth_token: String,
    /// Store identifier; set by the client from the current session.
    pub store_id: String,
}

/// Payment initiation response.
///
/// Carries the redirect URL to reach the hosted payment page and the
/// gateway-assigned order id used to verify the order later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Hosted checkout page URL.
    pub checkout_url: String,
    /// Gateway-assigned order identifier.
    pub order_id: String,
    /// Echoed payment amount.
    pub amount: Option<Decimal>,
    /// Echoed currency code.
    pub currency: Option<String>,
    /// Gateway status message.
    pub message: Option<String>,
}

/// Order record returned by the verification and status endpoints.
///
/// The gateway wraps this in a singleton array; the client surfaces only the
/// first element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedOrder {
    /// Gateway-assigned order identifier.
    pub order_id: String,
    /// Currency code.
    pub currency: Option<String>,
    /// Order amount.
    pub amount: Option<Decimal>,
    /// Amount payable after discounts.
    pub payable_amount: Option<Decimal>,
    /// Bank transaction identifier.
    pub bank_trx_id: Option<String>,
    /// Merchant invoice number.
    pub invoice_no: Option<String>,
    /// Bank-side status.
    pub bank_status: Option<String>,
    /// Gateway status code.
    pub sp_code: Option<String>,
    /// Gateway status message.
    pub sp_message: Option<String>,
    /// Transaction status.
    pub transaction_status: Option<String>,
    /// Payment method used.
    pub method: Option<String>,
    /// Transaction timestamp.
    pub date_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_deserialization() {
        let json = r#"{
            "token": "T1",
            "tokenType": "Bearer",
            "storeId": "S1",
            "createTime": "2022-06-13 07:00:00PM",
            "expiresIn": 3600,
            "message": "Ok"
        }"#;

        let token: SessionToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.token, "T1");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.store_id, "S1");
        assert_eq!(token.expires_in, 3600);
        assert!(token.granted());
    }

    #[test]
    fn test_session_token_not_granted() {
        let json = r#"{
            "token": "",
            "tokenType": "Bearer",
            "storeId": "",
            "createTime": "2022-06-13 07:00:00PM",
            "expiresIn": 0,
            "message": "Invalid credentials"
        }"#;

        let token: SessionToken = serde_json::from_str(json).unwrap();
        assert!(!token.granted());
    }

    #[test]
    fn test_authorization_header_format() {
        let token = SessionToken {
            token: "abc123".to_owned(),
            token_type: "Bearer".to_owned(),
            store_id: "S1".to_owned(),
            create_time: "2022-06-13 07:00:00PM".to_owned(),
            expires_in: 3600,
            message: "Ok".to_owned(),
        };

        assert_eq!(token.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn test_payment_request_serialization_camel_case() {
        let request = PaymentRequest {
            prefix: "sp".to_owned(),
            amount: Decimal::new(101050, 2),
            order_id: "ord-1".to_owned(),
            currency: "BDT".to_owned(),
            return_url: "https://cb".to_owned(),
            cancel_url: "https://cb".to_owned(),
            auth_token: "T1".to_owned(),
            store_id: "S1".to_owned(),
            ..Default::default()
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"returnUrl\":\"https://cb\""));
        assert!(json.contains("\"cancelUrl\":\"https://cb\""));
        assert!(json.contains("\"authToken\":\"T1\""));
        assert!(json.contains("\"storeId\":\"S1\""));
        assert!(json.contains("\"orderId\":\"ord-1\""));
    }

    #[test]
    fn test_payment_response_deserialization() {
        let json = r#"{
            "checkoutUrl": "https://sandbox.shurjopayment.com/checkout/abc",
            "orderId": "sp-ord-42",
            "amount": 150.50,
            "currency": "BDT",
            "message": "initiated"
        }"#;

        let response: PaymentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.order_id, "sp-ord-42");
        assert!(response.checkout_url.contains("/checkout/"));
        assert_eq!(response.amount, Some(Decimal::new(15050, 2)));
    }

    #[test]
    fn test_payment_response_optional_fields_absent() {
        let json = r#"{
            "checkoutUrl": "https://sandbox.shurjopayment.com/checkout/abc",
            "orderId": "sp-ord-42",
            "amount": null,
            "currency": null,
            "message": null
        }"#;

        let response: PaymentResponse = serde_json::from_str(json).unwrap();
        assert!(response.amount.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_verified_order_deserialization() {
        let json = r#"{
            "orderId": "sp-ord-42",
            "currency": "BDT",
            "amount": 150.50,
            "payableAmount": 150.50,
            "bankTrxId": "btx-9",
            "invoiceNo": "inv-7",
            "bankStatus": "Success",
            "spCode": "1000",
            "spMessage": "Success",
            "transactionStatus": "Completed",
            "method": "Visa",
            "dateTime": "2022-06-13 07:05:11PM"
        }"#;

        let order: VerifiedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "sp-ord-42");
        assert_eq!(order.bank_status.as_deref(), Some("Success"));
        assert_eq!(order.method.as_deref(), Some("Visa"));
    }

    #[test]
    fn test_verified_order_singleton_array() {
        let json = r#"[{
            "orderId": "sp-ord-42",
            "currency": null,
            "amount": null,
            "payableAmount": null,
            "bankTrxId": null,
            "invoiceNo": null,
            "bankStatus": null,
            "spCode": null,
            "spMessage": null,
            "transactionStatus": null,
            "method": null,
            "dateTime": null
        }]"#;

        let orders: Vec<VerifiedOrder> = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "sp-ord-42");
    }

    #[test]
    fn test_payment_request_default_is_empty() {
        let request = PaymentRequest::default();
        assert!(request.auth_token.is_empty());
        assert!(request.store_id.is_empty());
        assert_eq!(request.amount, Decimal::ZERO);
    }
}
