//! Voucher Provisioning Workflow
//!
//! Orchestrates the payment status check and the device command. Two paths
//! exist on purpose:
//!
//! - **Confirm-then-issue** ([`Provisioner::provision`]): the caller waits
//!   for the device command and learns its outcome.
//! - **Report-then-issue** ([`Provisioner::report_status`]): the caller gets
//!   the transaction status immediately; if it settled, issuance runs as a
//!   detached task whose outcome is visible only in the logs.
//!
//! Within one invocation the status check always precedes issuance, and
//! settlement is never remembered across invocations.

use std::sync::Arc;

use thiserror::Error;

use voucher_device::{DeviceClient, DeviceError, HotspotUser};
use voucher_payments::{PaymentError, PaymentGateway, TransactionState, TransactionStatus};

/// Comment tag stamped on every voucher the system creates
pub const VOUCHER_COMMENT: &str = "Voucher User Defined";

/// Profile used when the caller supplies credentials but no profile
/// (report-then-issue path)
pub const DEFAULT_PROFILE: &str = "default";

/// Result type alias
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Provisioning errors
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Caller input missing or empty
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment exists but has not reached settlement
    #[error("Transaction not settled (state: {0})")]
    NotSettled(TransactionState),

    /// Gateway failure while checking the payment
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Device failure while issuing the voucher
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Caller-supplied voucher parameters
#[derive(Clone, Debug)]
pub struct VoucherCredential {
    /// Hotspot username
    pub name: String,

    /// Hotspot password
    pub secret: String,

    /// Device profile governing access (e.g. "1hour")
    pub profile: String,
}

impl VoucherCredential {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty()
            || self.secret.trim().is_empty()
            || self.profile.trim().is_empty()
        {
            return Err(ProvisionError::InvalidRequest(
                "voucher name, secret, and profile are required".into(),
            ));
        }
        Ok(())
    }
}

/// A successfully issued voucher
#[derive(Clone, Debug)]
pub struct IssuedVoucher {
    pub name: String,
    pub profile: String,
}

impl IssuedVoucher {
    /// Confirmation message for API callers
    pub fn message(&self) -> String {
        format!("Voucher {} created with profile {}", self.name, self.profile)
    }
}

/// Settlement-gated voucher provisioner
#[derive(Clone)]
pub struct Provisioner {
    gateway: Arc<dyn PaymentGateway>,
    device: Arc<dyn DeviceClient>,
}

impl Provisioner {
    pub fn new(gateway: Arc<dyn PaymentGateway>, device: Arc<dyn DeviceClient>) -> Self {
        Self { gateway, device }
    }

    /// Fetch the live settlement state for an order
    ///
    /// Always a fresh gateway query; a failed check is surfaced once and
    /// never retried here.
    pub async fn check_status(&self, order_id: &str) -> Result<TransactionStatus> {
        if order_id.trim().is_empty() {
            return Err(ProvisionError::InvalidRequest(
                "order id is required".into(),
            ));
        }

        Ok(self.gateway.transaction_status(order_id).await?)
    }

    /// Issue one voucher on the device
    ///
    /// Single "add hotspot user" command with `password = secret` and the
    /// fixed comment tag. A duplicate name is the device's error and passes
    /// through untouched; there is no retry and no read-back.
    pub async fn issue(&self, credential: &VoucherCredential) -> Result<IssuedVoucher> {
        credential.validate()?;

        let user = HotspotUser {
            name: credential.name.clone(),
            password: credential.secret.clone(),
            profile: credential.profile.clone(),
            comment: VOUCHER_COMMENT.into(),
        };

        tracing::info!(name = %user.name, profile = %user.profile, "Creating voucher");
        self.device.add_hotspot_user(&user).await?;
        tracing::info!(name = %user.name, "Voucher created");

        Ok(IssuedVoucher {
            name: credential.name.clone(),
            profile: credential.profile.clone(),
        })
    }

    /// Confirm-then-issue: provision a voucher only for a settled order
    pub async fn provision(
        &self,
        order_id: &str,
        credential: &VoucherCredential,
    ) -> Result<IssuedVoucher> {
        credential.validate()?;

        let status = self.check_status(order_id).await?;
        if !status.is_settled() {
            return Err(ProvisionError::NotSettled(status.transaction_status));
        }

        tracing::info!(order_id, "Transaction settled");
        self.issue(credential).await
    }

    /// Report-then-issue: return the status now, issue in the background
    ///
    /// If the order settled, a detached task issues a voucher with the
    /// caller's username/password and [`DEFAULT_PROFILE`]. Its failure is
    /// logged, never returned: the status reply has already left.
    pub async fn report_status(
        &self,
        order_id: &str,
        username: &str,
        password: &str,
    ) -> Result<TransactionStatus> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(ProvisionError::InvalidRequest(
                "username and password are required".into(),
            ));
        }

        let status = self.check_status(order_id).await?;

        if status.is_settled() {
            tracing::info!(order_id, "Transaction settled");

            let provisioner = self.clone();
            let order = order_id.to_owned();
            let credential = VoucherCredential {
                name: username.to_owned(),
                secret: password.to_owned(),
                profile: DEFAULT_PROFILE.into(),
            };

            tokio::spawn(async move {
                match provisioner.issue(&credential).await {
                    Ok(voucher) => {
                        tracing::info!(order_id = %order, name = %voucher.name, "Voucher created");
                    }
                    Err(e) => {
                        tracing::error!(order_id = %order, error = %e, "Background voucher issuance failed");
                    }
                }
            });
        }

        Ok(status)
    }
}
