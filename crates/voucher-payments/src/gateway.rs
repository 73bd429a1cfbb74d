//! Payment Gateway Abstraction

use async_trait::async_trait;

use crate::error::Result;
use crate::snap::{SnapToken, SnapTransactionRequest};
use crate::status::TransactionStatus;

/// Payment gateway trait (Strategy pattern)
///
/// Implemented by the real Midtrans client; tests stub it to script
/// settlement outcomes without touching the network.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a new payment transaction and return its checkout token
    async fn create_transaction(&self, request: &SnapTransactionRequest) -> Result<SnapToken>;

    /// Fetch the live settlement state for an order
    ///
    /// Always a fresh upstream query; payment state must be current.
    async fn transaction_status(&self, order_id: &str) -> Result<TransactionStatus>;

    /// Gateway name
    fn name(&self) -> &str;
}
