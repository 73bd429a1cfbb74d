//! Midtrans Snap Integration
//!
//! Client for the Midtrans Snap checkout API and the Core transaction
//! status API. Every call authenticates with HTTP Basic auth using the
//! merchant server key (empty password), per the Midtrans convention.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};
use crate::gateway::PaymentGateway;
use crate::status::TransactionStatus;

/// Midtrans client configuration
#[derive(Clone, Debug)]
pub struct MidtransConfig {
    /// Merchant server key (never log this)
    pub server_key: String,

    /// Production vs sandbox endpoints
    pub production: bool,
}

impl MidtransConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let server_key = std::env::var("MIDTRANS_SERVER_KEY")
            .map_err(|_| PaymentError::Config("MIDTRANS_SERVER_KEY not set".into()))?;
        let production = std::env::var("MIDTRANS_IS_PRODUCTION")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            server_key,
            production,
        })
    }
}

/// Midtrans client wrapper
pub struct MidtransClient {
    http: reqwest::Client,
    config: MidtransConfig,
}

impl MidtransClient {
    /// Create a new Midtrans client
    pub fn new(config: MidtransConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(MidtransConfig::from_env()?))
    }

    /// Snap (checkout) API host
    fn snap_base(&self) -> &'static str {
        if self.config.production {
            "https://app.midtrans.com"
        } else {
            "https://app.sandbox.midtrans.com"
        }
    }

    /// Core (status) API host
    fn api_base(&self) -> &'static str {
        if self.config.production {
            "https://api.midtrans.com"
        } else {
            "https://api.sandbox.midtrans.com"
        }
    }

    /// Turn a non-2xx reply into a `PaymentError::Api`
    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(PaymentError::Api { status, message })
    }
}

#[async_trait]
impl PaymentGateway for MidtransClient {
    async fn create_transaction(&self, request: &SnapTransactionRequest) -> Result<SnapToken> {
        let url = format!("{}/snap/v1/transactions", self.snap_base());

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.server_key, Some(""))
            .json(request)
            .send()
            .await?;

        let token = Self::expect_success(response)
            .await?
            .json::<SnapToken>()
            .await?;

        tracing::debug!(
            order_id = %request.transaction_details.order_id,
            "Snap transaction created"
        );

        Ok(token)
    }

    async fn transaction_status(&self, order_id: &str) -> Result<TransactionStatus> {
        let url = format!("{}/v2/{}/status", self.api_base(), order_id);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.server_key, Some(""))
            .send()
            .await?;

        let status = Self::expect_success(response)
            .await?
            .json::<TransactionStatus>()
            .await?;

        tracing::debug!(
            order_id = %status.order_id,
            state = %status.transaction_status,
            "Fetched transaction status"
        );

        Ok(status)
    }

    fn name(&self) -> &str {
        "Midtrans"
    }
}

/// Request to open a Snap transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapTransactionRequest {
    pub transaction_details: TransactionDetails,
    pub customer_details: CustomerDetails,
}

/// Order identifier and amount
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,

    /// Amount in whole rupiah
    pub gross_amount: u64,
}

/// Customer contact information attached to the transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub phone: String,
}

/// Snap checkout token reply
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapToken {
    /// Token the frontend feeds to the Snap popup
    pub token: String,

    /// Hosted checkout URL for redirect flows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_and_production_hosts() {
        let sandbox = MidtransClient::new(MidtransConfig {
            server_key: "sk".into(),
            production: false,
        });
        assert_eq!(sandbox.snap_base(), "https://app.sandbox.midtrans.com");
        assert_eq!(sandbox.api_base(), "https://api.sandbox.midtrans.com");

        let production = MidtransClient::new(MidtransConfig {
            server_key: "sk".into(),
            production: true,
        });
        assert_eq!(production.snap_base(), "https://app.midtrans.com");
        assert_eq!(production.api_base(), "https://api.midtrans.com");
    }

    #[test]
    fn snap_request_matches_wire_shape() {
        let request = SnapTransactionRequest {
            transaction_details: TransactionDetails {
                order_id: "ORD1".into(),
                gross_amount: 10_000,
            },
            customer_details: CustomerDetails {
                first_name: "Budi".into(),
                phone: "081234567890".into(),
            },
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["transaction_details"]["order_id"], "ORD1");
        assert_eq!(wire["transaction_details"]["gross_amount"], 10_000);
        assert_eq!(wire["customer_details"]["first_name"], "Budi");
        assert_eq!(wire["customer_details"]["phone"], "081234567890");
    }

    #[test]
    fn snap_token_parses_with_and_without_redirect() {
        let token: SnapToken =
            serde_json::from_str(r#"{"token":"66e4fa55","redirect_url":"https://app.sandbox.midtrans.com/snap/v2/vtweb/66e4fa55"}"#)
                .unwrap();
        assert_eq!(token.token, "66e4fa55");
        assert!(token.redirect_url.is_some());

        let bare: SnapToken = serde_json::from_str(r#"{"token":"66e4fa55"}"#).unwrap();
        assert!(bare.redirect_url.is_none());
    }
}
