//! Ledger store service router.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tally_core::LedgerStore;
use tally_shared::AccountId;
use tracing::info;
use uuid::Uuid;

use super::wire_error;
use crate::wire::{BalanceResponse, MutationRequest, OpenAccountRequest, TransferRequest};

/// Shared state: the ledger this service owns.
#[derive(Clone)]
pub struct LedgerServiceState {
    /// The ledger store authority.
    pub ledger: Arc<dyn LedgerStore>,
}

/// Builds the internal router for the ledger store service.
pub fn ledger_service_router(ledger: Arc<dyn LedgerStore>) -> Router {
    Router::new()
        .route("/internal/ledger/accounts", post(open_account))
        .route("/internal/ledger/accounts/{account_id}/credit", post(credit))
        .route("/internal/ledger/accounts/{account_id}/debit", post(debit))
        .route("/internal/ledger/accounts/{account_id}/balance", get(balance))
        .route(
            "/internal/ledger/accounts/{account_id}/transactions",
            get(list_transactions),
        )
        .route("/internal/ledger/transfers", post(transfer))
        .with_state(LedgerServiceState { ledger })
}

async fn open_account(
    State(state): State<LedgerServiceState>,
    Json(payload): Json<OpenAccountRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .open(payload.account_id, payload.initial_balance)
        .await
    {
        Ok(()) => {
            info!(account_id = %payload.account_id, "Ledger account opened");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => wire_error(&e),
    }
}

async fn credit(
    State(state): State<LedgerServiceState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<MutationRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .credit(
            AccountId::from_uuid(account_id),
            payload.amount,
            payload.description,
        )
        .await
    {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn debit(
    State(state): State<LedgerServiceState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<MutationRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .debit(
            AccountId::from_uuid(account_id),
            payload.amount,
            payload.description,
        )
        .await
    {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn transfer(
    State(state): State<LedgerServiceState>,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .transfer(payload.from, payload.to, payload.amount, payload.description)
        .await
    {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn balance(
    State(state): State<LedgerServiceState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.ledger.balance(AccountId::from_uuid(account_id)).await {
        Ok(balance) => (StatusCode::OK, Json(BalanceResponse { balance })).into_response(),
        Err(e) => wire_error(&e),
    }
}

async fn list_transactions(
    State(state): State<LedgerServiceState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .ledger
        .list_transactions(AccountId::from_uuid(account_id))
        .await
    {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => wire_error(&e),
    }
}
