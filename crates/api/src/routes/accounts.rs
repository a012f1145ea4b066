//! Account management routes.

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
use tally_core::Account;
use tally_shared::AccountId;
use tracing::{error, info};
use uuid::Uuid;

use super::error_response;
use crate::AppState;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/{account_id}", get(get_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Holder name.
    pub name: String,
    /// Holder email (must be unique).
    pub email: String,
    /// Opening balance (default: 0).
    #[serde(default)]
    pub initial_balance: Decimal,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: String,
    /// Holder name.
    pub name: String,
    /// Holder email.
    pub email: String,
    /// Current balance.
    pub balance: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name,
            email: account.email,
            balance: account.balance.to_string(),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    match state
        .coordinator
        .create_account(payload.name, payload.email, payload.initial_balance)
        .await
    {
        Ok(account) => {
            info!(account_id = %account.id, "Account created");
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            error_response(&e)
        }
    }
}

/// GET `/accounts/{account_id}` - Get account detail.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let account_id = AccountId::from_uuid(account_id);
    match state.coordinator.get_account(account_id).await {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/accounts` - List accounts in creation order.
async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    match state.coordinator.list_accounts().await {
        Ok(accounts) => {
            let accounts: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            error_response(&e)
        }
    }
}
