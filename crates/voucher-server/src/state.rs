//! Application State

use std::sync::Arc;

use voucher_payments::PaymentGateway;

use crate::provision::Provisioner;
use crate::session_cache::SessionCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway (Midtrans in production, stubbed in tests)
    pub gateway: Arc<dyn PaymentGateway>,

    /// Settlement-gated voucher provisioning
    pub provisioner: Arc<Provisioner>,

    /// Read-only view of the active-session cache
    pub sessions: SessionCache,
}
