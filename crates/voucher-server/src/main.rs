//! voucher-gate HTTP Server
//!
//! Axum-based server gating MikroTik hotspot voucher provisioning on
//! Midtrans payment settlement, with a periodically refreshed cache of the
//! router's active hotspot sessions.

mod config;
mod handlers;
mod provision;
mod session_cache;
mod state;
#[cfg(test)]
mod testutil;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voucher_device::{DeviceClient, RouterOsClient};
use voucher_payments::{MidtransClient, PaymentGateway};

use crate::config::ServerConfig;
use crate::handlers::app;
use crate::provision::Provisioner;
use crate::session_cache::{REFRESH_PERIOD, spawn_refresher};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Initialize the payment gateway
    let midtrans = MidtransClient::from_env()?;
    tracing::info!("✓ Midtrans configured");
    let gateway: Arc<dyn PaymentGateway> = Arc::new(midtrans);

    // Initialize the router client
    let router_client = RouterOsClient::from_env()?;
    tracing::info!(
        host = %router_client.config().host,
        port = router_client.config().port,
        "✓ RouterOS client configured"
    );
    let device: Arc<dyn DeviceClient> = Arc::new(router_client);

    // Settlement-gated provisioning
    let provisioner = Arc::new(Provisioner::new(gateway.clone(), device.clone()));

    // Active-session cache: one refresh now, then every minute
    let sessions = spawn_refresher(device, REFRESH_PERIOD);

    // Build application state
    let state = AppState {
        gateway,
        provisioner,
        sessions,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = app(state).layer(cors).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 voucher-gate server running on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  POST /api/payment                      - Create Snap transaction");
    tracing::info!("  POST /api/order-status                 - Check status, issue in background");
    tracing::info!("  POST /api/create-voucher               - Create voucher directly");
    tracing::info!("  POST /api/create-voucher-after-payment - Create voucher once settled");
    tracing::info!("  GET  /active-users                     - Cached active hotspot sessions");
    tracing::info!("");

    axum::serve(listener, router).await?;

    Ok(())
}
