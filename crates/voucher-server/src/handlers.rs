//! HTTP Handlers
//!
//! Thin validation-and-delegate layer. Every endpoint checks its required
//! fields before touching a collaborator, and collaborator failures map to
//! fixed per-endpoint messages; the detail stays in the server log.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use voucher_payments::{
    CustomerDetails, SnapTransactionRequest, TransactionDetails, TransactionStatus,
};

use crate::provision::{ProvisionError, VoucherCredential};
use crate::session_cache::SessionSnapshot;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VoucherResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<u64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn server_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// A field counts as present only when it is non-empty after trimming
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// Open a new payment and return the Snap checkout token
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (Some(order_id), Some(gross_amount), Some(customer_name), Some(phone)) = (
        present(&payload.order_id),
        payload.gross_amount.filter(|&a| a > 0),
        present(&payload.customer_name),
        present(&payload.phone),
    ) else {
        return Err(bad_request("Missing required fields"));
    };

    let request = SnapTransactionRequest {
        transaction_details: TransactionDetails {
            order_id: order_id.into(),
            gross_amount,
        },
        customer_details: CustomerDetails {
            first_name: customer_name.into(),
            phone: phone.into(),
        },
    };

    let transaction = state.gateway.create_transaction(&request).await.map_err(|e| {
        tracing::error!(error = %e, "Midtrans payment error");
        server_error("Failed to create transaction")
    })?;

    Ok(Json(TokenResponse {
        token: transaction.token,
    }))
}

/// Report the live transaction status; settled orders get a background voucher
pub async fn order_status(
    State(state): State<AppState>,
    Json(payload): Json<OrderStatusRequest>,
) -> Result<Json<TransactionStatus>, ApiError> {
    let (Some(order_id), Some(username), Some(password)) = (
        present(&payload.order_id),
        present(&payload.username),
        present(&payload.password),
    ) else {
        return Err(bad_request("Order ID, username, and password are required"));
    };

    let status = state
        .provisioner
        .report_status(order_id, username, password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching transaction status by orderId");
            server_error("Failed to fetch transaction status by orderId")
        })?;

    Ok(Json(status))
}

/// Create a voucher directly, no settlement check on this route
pub async fn create_voucher(
    State(state): State<AppState>,
    Json(payload): Json<CreateVoucherRequest>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let (Some(_order_id), Some(voucher_code), Some(profile)) = (
        present(&payload.order_id),
        present(&payload.voucher_code),
        present(&payload.profile),
    ) else {
        return Err(bad_request(
            "Order ID, voucher code, and profile are required",
        ));
    };

    let credential = VoucherCredential {
        name: voucher_code.into(),
        secret: voucher_code.into(),
        profile: profile.into(),
    };

    let voucher = state.provisioner.issue(&credential).await.map_err(|e| {
        tracing::error!(error = %e, "Error creating voucher");
        server_error("Failed to create voucher")
    })?;

    Ok(Json(VoucherResponse {
        success: true,
        message: voucher.message(),
    }))
}

/// Create a voucher only once the order has settled
pub async fn create_voucher_after_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreateVoucherRequest>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let (Some(order_id), Some(voucher_code), Some(profile)) = (
        present(&payload.order_id),
        present(&payload.voucher_code),
        present(&payload.profile),
    ) else {
        return Err(bad_request(
            "Order ID, voucher code, and profile are required",
        ));
    };

    let credential = VoucherCredential {
        name: voucher_code.into(),
        secret: voucher_code.into(),
        profile: profile.into(),
    };

    match state.provisioner.provision(order_id, &credential).await {
        Ok(voucher) => Ok(Json(VoucherResponse {
            success: true,
            message: voucher.message(),
        })),
        Err(ProvisionError::NotSettled(tx_state)) => {
            tracing::info!(order_id, state = %tx_state, "Transaction not settled yet");
            Err(bad_request("Transaction not settled yet"))
        }
        Err(ProvisionError::InvalidRequest(message)) => Err(bad_request(&message)),
        Err(e) => {
            tracing::error!(error = %e, "Error creating voucher");
            Err(server_error("Failed to create voucher"))
        }
    }
}

/// Last known active-session snapshot; never fails, never calls the device
pub async fn active_users(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.sessions.snapshot())
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/payment", post(create_payment))
        .route("/api/order-status", post(order_status))
        .route("/api/create-voucher", post(create_voucher))
        .route(
            "/api/create-voucher-after-payment",
            post(create_voucher_after_payment),
        )
        .route("/active-users", get(active_users))
        .with_state(state)
}
