//! Tally account directory service
//!
//! Owns account identity, email uniqueness, and balance snapshots for the
//! mesh topology. The gateway talks to it over the internal HTTP surface.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::InMemoryDirectory;
use tally_mesh::service::account_service_router;
use tally_shared::AppConfig;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "tally-accountd" }))
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

    // This process is the directory authority
    let directory = Arc::new(InMemoryDirectory::new());
    let app = Router::new()
        .route("/health", get(health))
        .merge(account_service_router(directory));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Account directory service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
