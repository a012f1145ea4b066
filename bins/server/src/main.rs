//! Tally layered server
//!
//! Runs the whole stack in one process: in-memory directory and ledger,
//! coordinator on top, public API in front.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_core::{Coordinator, InMemoryDirectory, InMemoryLedger};
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

    // Wire the coordinator to in-process stores
    let coordinator = Coordinator::new(
        Arc::new(InMemoryDirectory::new()),
        Arc::new(InMemoryLedger::new()),
    );
    info!("Coordinator bound to in-memory stores");

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
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
