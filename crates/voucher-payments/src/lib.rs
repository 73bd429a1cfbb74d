//! # voucher-payments
//!
//! Midtrans payment gateway integration for voucher-gate.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  Customer   │────▶│  Midtrans Snap   │────▶│ voucher-gate│
//! │  (checkout) │     │  hosted payment  │     │ (provision) │
//! └─────────────┘     └──────────────────┘     └─────────────┘
//! ```
//!
//! Two API surfaces are wrapped:
//!
//! - **Snap** (`/snap/v1/transactions`) — opens a hosted checkout and
//!   returns the token the frontend renders.
//! - **Core status** (`/v2/{order_id}/status`) — reports the live
//!   settlement state; provisioning gates on `settlement` and nothing else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voucher_payments::{MidtransClient, PaymentGateway};
//!
//! let client = MidtransClient::from_env()?;
//! let status = client.transaction_status("ORD1").await?;
//! if status.is_settled() {
//!     // release the voucher
//! }
//! ```

mod error;
mod gateway;
mod snap;
mod status;

pub use error::{PaymentError, Result};
pub use gateway::PaymentGateway;
pub use snap::{
    CustomerDetails, MidtransClient, MidtransConfig, SnapToken, SnapTransactionRequest,
    TransactionDetails,
};
pub use status::{TransactionState, TransactionStatus};
