//! Internal wire DTOs shared by the service routers and the clients.
//!
//! Service-to-service only; the public gateway surface lives in `tally-api`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::LedgerError;
use tally_shared::{AccountId, TransactionId};

/// Request body for creating an account in the directory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    /// Holder name.
    pub name: String,
    /// Holder email.
    pub email: String,
    /// Opening balance.
    pub initial_balance: Decimal,
}

/// Request body for refreshing a balance snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordBalanceRequest {
    /// The new balance.
    pub balance: Decimal,
    /// Id of the ledger record that produced the balance (watermark).
    pub as_of: TransactionId,
}

/// Response body for an existence probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the account exists.
    pub exists: bool,
}

/// Request body for registering an account with the ledger service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountRequest {
    /// The account to register.
    pub account_id: AccountId,
    /// Opening balance.
    pub initial_balance: Decimal,
}

/// Request body for a credit or debit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Record description.
    pub description: String,
}

/// Request body for an atomic transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Source account.
    pub from: AccountId,
    /// Destination account.
    pub to: AccountId,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional description; the ledger cross-references counterparties.
    pub description: Option<String>,
}

/// Response body for an authoritative balance read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The balance.
    pub balance: Decimal,
}

/// Error envelope carried on non-2xx internal responses.
///
/// The `error` field is the serde-tagged [`LedgerError`], so the receiving
/// side gets the exact variant back; `message` is the rendered form for
/// logs and humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireError {
    /// The structured error.
    pub error: LedgerError,
    /// Human-readable rendering of `error`.
    pub message: String,
}

impl From<&LedgerError> for WireError {
    fn from(error: &LedgerError) -> Self {
        Self {
            error: error.clone(),
            message: error.to_string(),
        }
    }
}
