//! Ledger store: authoritative balances and the append-only transaction log.
//!
//! This is the only component that mutates shared state. All mutations to a
//! given account go through that account's mutex, so same-account operations
//! are linearizable while disjoint accounts proceed in parallel. Transfers
//! lock both accounts for the duration of the pair, acquiring the locks in
//! ascending `AccountId` order to rule out lock-order inversion between
//! concurrent opposite-direction transfers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tally_shared::{AccountId, TransactionId};

use crate::error::LedgerError;
use crate::types::{LedgerReceipt, TransactionKind, TransactionRecord, TransferReceipt};

/// Capability interface for the ledger store.
///
/// The coordinator is written against this trait; the layered topology binds
/// it to [`InMemoryLedger`] and the mesh topology to an HTTP client.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Registers an account with the ledger and seeds its balance.
    ///
    /// Called exactly once per account, after the directory has assigned the
    /// id. All other operations report `NotFound` for unregistered accounts.
    async fn open(
        &self,
        account_id: AccountId,
        initial_balance: Decimal,
    ) -> Result<(), LedgerError>;

    /// Increases the balance by `amount` and appends one credit record.
    async fn credit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError>;

    /// Decreases the balance by `amount` and appends one debit record.
    ///
    /// Fails with `InsufficientFunds` if the debit would drive the balance
    /// negative; this check is the binding gate against overdraft.
    async fn debit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError>;

    /// Atomically moves `amount` from one account to another.
    ///
    /// Observable by any concurrent reader as either fully applied (both
    /// balances updated, both records present) or not applied at all.
    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<TransferReceipt, LedgerError>;

    /// Returns the account's records in insertion order.
    async fn list_transactions(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Returns the authoritative balance.
    async fn balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError>;
}

/// Per-account balance and log, guarded by one mutex.
#[derive(Debug)]
struct AccountBook {
    balance: Decimal,
    records: Vec<TransactionRecord>,
}

/// In-memory ledger store.
///
/// Reference implementation; a durable store can replace it behind
/// [`LedgerStore`] without touching the coordinator.
pub struct InMemoryLedger {
    books: DashMap<AccountId, Arc<Mutex<AccountBook>>>,
    next_record_id: AtomicU64,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            next_record_id: AtomicU64::new(1),
        }
    }

    /// Assigns the next record id.
    ///
    /// Called while holding the relevant account lock, so for any single
    /// account a larger id always corresponds to a later balance.
    fn next_id(&self) -> TransactionId {
        TransactionId::from_raw(self.next_record_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Looks up an account book, cloning the Arc out of the map so the map
    /// shard lock is released before the book mutex is taken.
    fn book(&self, account_id: AccountId) -> Result<Arc<Mutex<AccountBook>>, LedgerError> {
        self.books
            .get(&account_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(LedgerError::NotFound(account_id))
    }

    fn check_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn open(
        &self,
        account_id: AccountId,
        initial_balance: Decimal,
    ) -> Result<(), LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidInitialBalance(initial_balance));
        }
        match self.books.entry(account_id) {
            Entry::Occupied(_) => Err(LedgerError::Internal(format!(
                "account {account_id} already registered with the ledger"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(AccountBook {
                    balance: initial_balance,
                    records: Vec::new(),
                })));
                Ok(())
            }
        }
    }

    async fn credit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError> {
        Self::check_amount(amount)?;
        let book = self.book(account_id)?;

        let mut book = book.lock();
        book.balance += amount;
        let record = TransactionRecord {
            id: self.next_id(),
            account_id,
            kind: TransactionKind::Credit,
            amount,
            description,
            timestamp: Utc::now(),
        };
        book.records.push(record.clone());
        Ok(LedgerReceipt {
            record,
            balance: book.balance,
        })
    }

    async fn debit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError> {
        Self::check_amount(amount)?;
        let book = self.book(account_id)?;

        let mut book = book.lock();
        if book.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: book.balance,
                requested: amount,
            });
        }
        book.balance -= amount;
        let record = TransactionRecord {
            id: self.next_id(),
            account_id,
            kind: TransactionKind::Debit,
            amount,
            description,
            timestamp: Utc::now(),
        };
        book.records.push(record.clone());
        Ok(LedgerReceipt {
            record,
            balance: book.balance,
        })
    }

    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<TransferReceipt, LedgerError> {
        if from == to {
            return Err(LedgerError::SameAccount(from));
        }
        Self::check_amount(amount)?;

        let from_book = self.book(from)?;
        let to_book = self.book(to)?;

        // Single critical section keyed on the pair, acquired in ascending
        // id order so two opposite-direction transfers cannot deadlock.
        let (mut from_guard, mut to_guard) = if from < to {
            let f = from_book.lock();
            let t = to_book.lock();
            (f, t)
        } else {
            let t = to_book.lock();
            let f = from_book.lock();
            (f, t)
        };

        if from_guard.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: from_guard.balance,
                requested: amount,
            });
        }

        from_guard.balance -= amount;
        to_guard.balance += amount;

        let base = description.unwrap_or_else(|| "Transfer".to_string());
        let timestamp = Utc::now();
        let debit = TransactionRecord {
            id: self.next_id(),
            account_id: from,
            kind: TransactionKind::Debit,
            amount,
            description: format!("{base} to {to}"),
            timestamp,
        };
        let credit = TransactionRecord {
            id: self.next_id(),
            account_id: to,
            kind: TransactionKind::Credit,
            amount,
            description: format!("{base} from {from}"),
            timestamp,
        };
        from_guard.records.push(debit.clone());
        to_guard.records.push(credit.clone());

        Ok(TransferReceipt {
            debit,
            credit,
            from_balance: from_guard.balance,
            to_balance: to_guard.balance,
        })
    }

    async fn list_transactions(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        let book = self.book(account_id)?;
        let book = book.lock();
        Ok(book.records.clone())
    }

    async fn balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        let book = self.book(account_id)?;
        let balance = book.lock().balance;
        Ok(balance)
    }
}
