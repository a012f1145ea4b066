//! Transaction routes: deposit, withdraw, transfer, and history.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tally_core::TransactionRecord;
use tally_shared::AccountId;
use tracing::error;
use uuid::Uuid;

use super::error_response;
use crate::AppState;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions/deposit", post(deposit))
        .route("/transactions/withdraw", post(withdraw))
        .route("/transactions/transfer", post(transfer))
        .route("/accounts/{account_id}/transactions", get(list_transactions))
}

/// Request body for a deposit or withdrawal.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Target account.
    pub account_id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional description; defaults by operation type.
    pub description: Option<String>,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Source account.
    pub from_account_id: Uuid,
    /// Destination account.
    pub to_account_id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional description; both legs cross-reference the counterparty.
    pub description: Option<String>,
}

/// Response for a transaction record.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Record ID.
    pub id: String,
    /// Account the record belongs to.
    pub account_id: String,
    /// "credit" or "debit".
    pub kind: String,
    /// Amount.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Recording timestamp (RFC 3339).
    pub timestamp: String,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            account_id: record.account_id.to_string(),
            kind: record.kind.to_string(),
            amount: record.amount.to_string(),
            description: record.description,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

/// POST `/transactions/deposit` - Deposit into an account.
async fn deposit(
    State(state): State<AppState>,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let account_id = AccountId::from_uuid(payload.account_id);
    match state
        .coordinator
        .deposit(account_id, payload.amount, payload.description)
        .await
    {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "transaction_id": receipt.record.id.to_string(),
                "account_id": account_id.to_string(),
                "new_balance": receipt.balance.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(account_id = %account_id, error = %e, "Deposit failed");
            error_response(&e)
        }
    }
}

/// POST `/transactions/withdraw` - Withdraw from an account.
async fn withdraw(
    State(state): State<AppState>,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let account_id = AccountId::from_uuid(payload.account_id);
    match state
        .coordinator
        .withdraw(account_id, payload.amount, payload.description)
        .await
    {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "transaction_id": receipt.record.id.to_string(),
                "account_id": account_id.to_string(),
                "new_balance": receipt.balance.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(account_id = %account_id, error = %e, "Withdrawal failed");
            error_response(&e)
        }
    }
}

/// POST `/transactions/transfer` - Transfer between two accounts.
async fn transfer(
    State(state): State<AppState>,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let from = AccountId::from_uuid(payload.from_account_id);
    let to = AccountId::from_uuid(payload.to_account_id);
    match state
        .coordinator
        .transfer(from, to, payload.amount, payload.description)
        .await
    {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "debit_transaction_id": receipt.debit.id.to_string(),
                "credit_transaction_id": receipt.credit.id.to_string(),
                "from_balance": receipt.from_balance.to_string(),
                "to_balance": receipt.to_balance.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(from = %from, to = %to, error = %e, "Transfer failed");
            error_response(&e)
        }
    }
}

/// GET `/accounts/{account_id}/transactions` - Transaction history.
async fn list_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let account_id = AccountId::from_uuid(account_id);
    match state.coordinator.list_transactions(account_id).await {
        Ok(records) => {
            let transactions: Vec<TransactionResponse> =
                records.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(json!({ "transactions": transactions }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}
