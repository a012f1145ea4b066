//! Account directory service router.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tally_core::AccountDirectory;
use tally_shared::AccountId;
use tracing::info;
use uuid::Uuid;

use super::wire_error;
use crate::wire::{CreateAccountRequest, ExistsResponse, RecordBalanceRequest};

/// Shared state: the directory this service owns.
#[derive(Clone)]
pub struct AccountServiceState {
    /// The account directory authority.
    pub directory: Arc<dyn AccountDirectory>,
}

/// Builds the internal router for the account directory service.
pub fn account_service_router(directory: Arc<dyn AccountDirectory>) -> Router {
    Router::new()
        .route("/internal/accounts", post(create_account).get(list_accounts))
        .route("/internal/accounts/{account_id}", get(get_account))
        .route("/internal/accounts/{account_id}/exists", get(exists))
        .route("/internal/accounts/{account_id}/balance", put(record_balance))
        .with_state(AccountServiceState { directory })
}

async fn create_account(
    State(state): State<AccountServiceState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    match state
        .directory
        .create(payload.name, payload.email, payload.initial_balance)
        .await
    {
        Ok(account) => {
            info!(account_id = %account.id, "Directory account created");
            (StatusCode::CREATED, Json(account)).into_response()
        }
        Err(e) => wire_error(&e),
    }
}

async fn get_account(
    State(state): State<AccountServiceState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.directory.get(AccountId::from_uuid(account_id)).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn list_accounts(State(state): State<AccountServiceState>) -> impl IntoResponse {
    match state.directory.list().await {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn exists(
    State(state): State<AccountServiceState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.directory.exists(AccountId::from_uuid(account_id)).await {
        Ok(exists) => (StatusCode::OK, Json(ExistsResponse { exists })).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn record_balance(
    State(state): State<AccountServiceState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<RecordBalanceRequest>,
) -> impl IntoResponse {
    match state
        .directory
        .record_balance(
            AccountId::from_uuid(account_id),
            payload.balance,
            payload.as_of,
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => wire_error(&e),
    }
}
