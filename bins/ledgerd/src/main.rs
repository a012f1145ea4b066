//! Tally ledger store service
//!
//! The transaction authority of the mesh topology. Holds every balance and
//! transaction record and enforces the overdraft precondition; transfers
//! apply atomically inside this process.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::InMemoryLedger;
use tally_mesh::service::ledger_service_router;
use tally_shared::AppConfig;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "tally-ledgerd" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // This process is the ledger authority
    let ledger = Arc::new(InMemoryLedger::new());
    let app = Router::new()
        .route("/health", get(health))
        .merge(ledger_service_router(ledger));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Ledger store service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
