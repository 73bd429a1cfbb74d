//! Transaction Status Model
//!
//! Typed view of the Midtrans `/v2/{order_id}/status` reply. Status objects
//! are ephemeral: fetched live for every check, never cached.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Midtrans transaction lifecycle states
///
/// The gateway reports more states than the voucher flow cares about; only
/// [`TransactionState::Settlement`] gates provisioning. Everything else is
/// treated uniformly as "not settled".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Authorize,
    Capture,
    Settlement,
    Pending,
    Deny,
    Cancel,
    Expire,
    Failure,
    Refund,
    PartialRefund,
    /// Forward-compatible catch-all for states Midtrans adds later
    #[serde(other)]
    Unknown,
}

impl TransactionState {
    /// Whether this state releases a voucher
    pub fn is_settled(&self) -> bool {
        matches!(self, TransactionState::Settlement)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Authorize => "authorize",
            TransactionState::Capture => "capture",
            TransactionState::Settlement => "settlement",
            TransactionState::Pending => "pending",
            TransactionState::Deny => "deny",
            TransactionState::Cancel => "cancel",
            TransactionState::Expire => "expire",
            TransactionState::Failure => "failure",
            TransactionState::Refund => "refund",
            TransactionState::PartialRefund => "partial_refund",
            TransactionState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status reply for a single order
///
/// Returned verbatim to `/api/order-status` callers, so the serde shape
/// matches the Midtrans wire format field for field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Order identifier the status refers to
    pub order_id: String,

    /// Current lifecycle state
    pub transaction_status: TransactionState,

    /// Gateway status code (stringly typed on the wire, e.g. "200")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Gateway-assigned transaction identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Amount as reported by the gateway (e.g. "10000.00")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_status: Option<String>,

    /// When the transaction was created (gateway-local time)
    #[serde(
        default,
        with = "midtrans_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_time: Option<NaiveDateTime>,

    /// When the transaction settled, if it has
    #[serde(
        default,
        with = "midtrans_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub settlement_time: Option<NaiveDateTime>,
}

impl TransactionStatus {
    /// Whether provisioning may proceed for this order
    pub fn is_settled(&self) -> bool {
        self.transaction_status.is_settled()
    }
}

/// Midtrans timestamps use `"2025-01-01 12:00:00"` rather than RFC 3339
mod midtrans_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
