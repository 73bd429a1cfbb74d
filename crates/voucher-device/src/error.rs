//! Device Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, DeviceError>;

/// RouterOS device errors
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Device rejected our credentials
    #[error("Device authentication failed: {0}")]
    Auth(String),

    /// Device accepted the connection but refused the command
    /// (e.g. "already have user with this name")
    #[error("Device command failed ({status}): {detail}")]
    Command { status: u16, detail: String },

    /// Transport-level failure reaching the device
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeviceError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, DeviceError::Network(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            DeviceError::Auth(_) => "Could not authenticate to the network device.",
            DeviceError::Command { .. } => "The network device rejected the command.",
            DeviceError::Network(_) => "Network device unreachable.",
            DeviceError::Config(_) => "Device configuration error.",
        }
    }
}
