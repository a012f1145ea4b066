//! Tally mesh gateway
//!
//! Serves the same public API as the layered server, but the coordinator
//! binds to the remote directory and ledger services over HTTP.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_core::Coordinator;
use tally_mesh::{HttpAccountDirectory, HttpLedgerStore};
use tally_shared::AppConfig;

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

    // Wire the coordinator to the remote services
    let http = reqwest::Client::new();
    let coordinator = Coordinator::new(
        Arc::new(HttpAccountDirectory::new(
            config.mesh.account_service_url.clone(),
            http.clone(),
        )),
        Arc::new(HttpLedgerStore::new(
            config.mesh.ledger_service_url.clone(),
            http,
        )),
    );
    info!(
        account_service = %config.mesh.account_service_url,
        ledger_service = %config.mesh.ledger_service_url,
        "Coordinator bound to remote services"
    );

    // Create application state
    let state = AppState {
        coordinator: Arc::new(coordinator),
        service: env!("CARGO_PKG_NAME"),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
