//! # voucher-device
//!
//! MikroTik RouterOS hotspot integration for voucher-gate.
//!
//! Two device operations back the whole system: writing a hotspot user
//! (voucher issuance) and listing active hotspot sessions (cache refresh).
//! Both go through the [`DeviceClient`] trait so the server core never
//! depends on a real router being reachable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voucher_device::{DeviceClient, HotspotUser, RouterOsClient};
//!
//! let router = RouterOsClient::from_env()?;
//! router
//!     .add_hotspot_user(&HotspotUser {
//!         name: "VCH1".into(),
//!         password: "VCH1".into(),
//!         profile: "1hour".into(),
//!         comment: "Voucher User Defined".into(),
//!     })
//!     .await?;
//! ```

mod error;
mod mock;
mod model;
mod rest;

pub use error::{DeviceError, Result};
pub use mock::MockDeviceClient;
pub use model::{ActiveSession, HotspotUser};
pub use rest::{DeviceConfig, RouterOsClient};

use async_trait::async_trait;

/// Device client trait (Strategy pattern)
///
/// Implement this per management surface: REST, binary API, SSH, etc.
/// Every call authenticates on its own; implementations must never leave a
/// half-authenticated session visible to a concurrent caller.
#[async_trait]
pub trait DeviceClient: Send + Sync {
    /// Create one hotspot user on the device
    ///
    /// Success means the device accepted the command; there is no
    /// confirmation read-back. A duplicate name is the device's error to
    /// report, not ours to dedupe.
    async fn add_hotspot_user(&self, user: &HotspotUser) -> Result<()>;

    /// List currently connected hotspot clients
    async fn active_sessions(&self) -> Result<Vec<ActiveSession>>;

    /// Client name
    fn name(&self) -> &str;
}
