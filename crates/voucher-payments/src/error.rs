//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment gateway errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Gateway rejected the request or reported a failure
    #[error("Midtrans API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the gateway
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Network(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Api { .. } => "Payment gateway rejected the request.",
            PaymentError::Network(_) => "Payment gateway unreachable. Please try again.",
            PaymentError::Parse(_) => "Unexpected response from the payment gateway.",
            PaymentError::Config(_) => "Payment service configuration error.",
        }
    }
}
