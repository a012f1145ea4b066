//! Ledger domain types.
//!
//! Accounts, transaction records, and the receipts returned by mutations.
//! Records are immutable once created; the log is append-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{AccountId, TransactionId};

/// Record kind: either credit or debit.
///
/// A transfer is recorded as a matched debit/credit pair rather than a
/// single balance delta (double-entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Balance increase.
    Credit,
    /// Balance decrease.
    Debit,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
        }
    }
}

/// A bank account as held by the account directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID, assigned at creation, never reused.
    pub id: AccountId,
    /// Holder name (non-empty).
    pub name: String,
    /// Holder email, unique across all accounts.
    pub email: String,
    /// Balance snapshot. Authoritative in the layered topology; in the mesh
    /// topology this is a replica refreshed after each mutation.
    pub balance: Decimal,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
}

/// A single immutable entry in the append-only transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Record ID from the strictly increasing global sequence.
    pub id: TransactionId,
    /// The account this record belongs to.
    pub account_id: AccountId,
    /// Credit or debit.
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Free-text description; defaults per operation type.
    pub description: String,
    /// Recording timestamp. Both legs of a transfer share one timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Result of a single-account mutation (credit or debit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// The appended record.
    pub record: TransactionRecord,
    /// The account balance after the mutation.
    pub balance: Decimal,
}

/// Result of an atomic transfer.
///
/// Both records share a timestamp and carry equal amounts; the pair is
/// observable only as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Debit record on the source account.
    pub debit: TransactionRecord,
    /// Credit record on the destination account.
    pub credit: TransactionRecord,
    /// Source balance after the transfer.
    pub from_balance: Decimal,
    /// Destination balance after the transfer.
    pub to_balance: Decimal,
}
