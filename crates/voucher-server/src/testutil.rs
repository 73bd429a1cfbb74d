//! Shared test doubles

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use voucher_payments::{
    PaymentError, PaymentGateway, Result, SnapToken, SnapTransactionRequest, TransactionState,
    TransactionStatus,
};

/// Scripted payment gateway
///
/// Reports every order in the configured state and counts upstream calls so
/// tests can assert "no gateway call was made".
pub struct StubGateway {
    state: TransactionState,
    fail: bool,
    status_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl StubGateway {
    pub fn with_state(state: TransactionState) -> Self {
        Self {
            state,
            fail: false,
            status_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// A gateway whose every call errors out
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_state(TransactionState::Pending)
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_transaction(&self, _request: &SnapTransactionRequest) -> Result<SnapToken> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(PaymentError::Api {
                status: 500,
                message: "scripted failure".into(),
            });
        }

        Ok(SnapToken {
            token: "tok_stub".into(),
            redirect_url: None,
        })
    }

    async fn transaction_status(&self, order_id: &str) -> Result<TransactionStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(PaymentError::Api {
                status: 500,
                message: "scripted failure".into(),
            });
        }

        Ok(TransactionStatus {
            order_id: order_id.to_owned(),
            transaction_status: self.state.clone(),
            status_code: Some("200".into()),
            status_message: None,
            transaction_id: None,
            gross_amount: None,
            payment_type: None,
            fraud_status: None,
            transaction_time: None,
            settlement_time: None,
        })
    }

    fn name(&self) -> &str {
        "StubGateway"
    }
}
