//! Core ledger engine for Tally.
//!
//! This crate implements the ledger mutation engine shared by both
//! deployment topologies:
//! - Ledger store: balances and the append-only transaction log
//! - Account directory: account identity and uniqueness
//! - Validator: advisory pre-flight checks
//! - Transaction coordinator: orchestration of deposits, withdrawals and
//!   transfers over capability traits
//!
//! The coordinator never knows whether the directory and store it talks to
//! are in-process or remote; that binding is decided in the binaries.

pub mod coordinator;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod types;
pub mod validator;

#[cfg(test)]
mod props;

pub use coordinator::Coordinator;
pub use directory::{AccountDirectory, InMemoryDirectory};
pub use error::{ErrorClass, LedgerError};
pub use ledger::{InMemoryLedger, LedgerStore};
pub use types::{
    Account, LedgerReceipt, TransactionKind, TransactionRecord, TransferReceipt,
};
pub use validator::{Validator, MAX_TRANSACTION_AMOUNT};
