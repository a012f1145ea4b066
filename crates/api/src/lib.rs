//! HTTP API layer with Axum routes.
//!
//! This crate provides the public gateway surface. Both topologies serve
//! the exact same router; only the coordinator's bindings differ (in-memory
//! stores in the layered server, remote clients in the mesh gateway).

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tally_core::Coordinator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The transaction coordinator, bound to either local or remote stores.
    pub coordinator: Arc<Coordinator>,
    /// Name of the binary serving this router, reported by `/health`.
    pub service: &'static str,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
