//! Ledger error taxonomy.
//!
//! Every failure the engine can produce is one of these variants. The enum
//! is serde-tagged so the mesh services can ship the exact variant across
//! the wire and clients can reconstruct it instead of collapsing everything
//! into an opaque message.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::AccountId;
use thiserror::Error;

/// Client-visible error class, per the operation contract.
///
/// The gateway maps these to transport-level status codes; the class is what
/// keeps "your request was invalid" distinguishable from "the system could
/// not currently process a valid request".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The referenced entity does not exist.
    NotFound,
    /// The request itself was malformed or out of policy.
    InvalidArgument,
    /// The request was valid but conflicts with current state.
    Conflict,
    /// A downstream dependency was unreachable or timed out.
    Unavailable,
    /// An invariant the engine relies on was broken.
    Internal,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code", content = "details", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerError {
    /// Account does not exist.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Amount exceeds the per-transaction policy limit.
    #[error("Amount {amount} exceeds maximum limit of {limit}")]
    AmountAboveLimit {
        /// The requested amount.
        amount: Decimal,
        /// The policy limit.
        limit: Decimal,
    },

    /// Initial balance cannot be negative.
    #[error("Initial balance cannot be negative, got {0}")]
    InvalidInitialBalance(Decimal),

    /// Account name must be non-empty.
    #[error("Account name must not be empty")]
    EmptyName,

    /// Email is already registered to another account.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Source and destination accounts must differ.
    #[error("Cannot transfer to the same account: {0}")]
    SameAccount(AccountId),

    /// Balance is too low for the requested debit.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The balance at the time of the check.
        balance: Decimal,
        /// The amount that was requested.
        requested: Decimal,
    },

    /// A downstream dependency was unreachable or timed out.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AmountAboveLimit { .. } => "AMOUNT_ABOVE_LIMIT",
            Self::InvalidInitialBalance(_) => "INVALID_INITIAL_BALANCE",
            Self::EmptyName => "EMPTY_NAME",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::SameAccount(_) => "SAME_ACCOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the client-visible error class.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::InvalidAmount(_)
            | Self::AmountAboveLimit { .. }
            | Self::InvalidInitialBalance(_)
            | Self::EmptyName
            | Self::SameAccount(_) => ErrorClass::InvalidArgument,
            Self::DuplicateEmail(_) | Self::InsufficientFunds { .. } => ErrorClass::Conflict,
            Self::Unavailable(_) => ErrorClass::Unavailable,
            Self::Internal(_) => ErrorClass::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::NotFound => 404,
            ErrorClass::InvalidArgument => 400,
            ErrorClass::Conflict => 409,
            ErrorClass::Unavailable => 503,
            ErrorClass::Internal => 500,
        }
    }

    /// Returns true if a caller may safely retry after this error.
    ///
    /// Only `Unavailable` qualifies, and only if the caller can confirm the
    /// operation did not already commit. Client-caused errors are never
    /// retried by the core.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
