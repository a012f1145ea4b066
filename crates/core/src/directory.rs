//! Account directory: identity, uniqueness, and balance snapshots.
//!
//! The directory is the authority for who an account is (id, name, email,
//! creation time). Its balance field is a snapshot: authoritative in the
//! layered topology where every mutation refreshes it synchronously, a
//! replica in the mesh topology where the refresh is a best-effort remote
//! call. The validator reads this snapshot; the ledger store's own
//! preconditions remain the binding source of truth.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tally_shared::{AccountId, TransactionId};
use tracing::debug;

use crate::error::LedgerError;
use crate::types::Account;

/// Capability interface for the account directory.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Creates an account with a fresh unique id.
    async fn create(
        &self,
        name: String,
        email: String,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError>;

    /// Fetches an account by id.
    async fn get(&self, account_id: AccountId) -> Result<Account, LedgerError>;

    /// Lists all accounts in creation order.
    async fn list(&self) -> Result<Vec<Account>, LedgerError>;

    /// Returns whether the account exists.
    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError>;

    /// Refreshes the balance snapshot after a ledger mutation.
    ///
    /// `as_of` is the id of the record that produced `balance`. The refresh
    /// is applied only if `as_of` is newer than the stored watermark, so
    /// refreshes arriving out of order cannot regress the snapshot.
    async fn record_balance(
        &self,
        account_id: AccountId,
        balance: Decimal,
        as_of: TransactionId,
    ) -> Result<(), LedgerError>;
}

/// Directory entry: the account plus the snapshot watermark.
#[derive(Debug, Clone)]
struct DirectoryEntry {
    account: Account,
    /// Id of the ledger record the balance snapshot reflects.
    as_of: Option<TransactionId>,
}

/// In-memory account directory.
pub struct InMemoryDirectory {
    accounts: DashMap<AccountId, Arc<Mutex<DirectoryEntry>>>,
    /// Email -> owner, doubling as the uniqueness reservation.
    emails: DashMap<String, AccountId>,
    /// Creation order for `list`.
    order: Mutex<Vec<AccountId>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryDirectory {
    async fn create(
        &self,
        name: String,
        email: String,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidInitialBalance(initial_balance));
        }
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let id = AccountId::new();

        // Check-and-reserve in one step; a concurrent create with the same
        // email loses the entry race and sees Occupied.
        match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => return Err(LedgerError::DuplicateEmail(email)),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let account = Account {
            id,
            name,
            email,
            balance: initial_balance,
            created_at: Utc::now(),
        };
        self.accounts.insert(
            id,
            Arc::new(Mutex::new(DirectoryEntry {
                account: account.clone(),
                as_of: None,
            })),
        );
        self.order.lock().push(id);

        Ok(account)
    }

    async fn get(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        let entry = self
            .accounts
            .get(&account_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or(LedgerError::NotFound(account_id))?;
        let account = entry.lock().account.clone();
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<Account>, LedgerError> {
        let order = self.order.lock().clone();
        let mut accounts = Vec::with_capacity(order.len());
        for id in order {
            if let Some(entry) = self.accounts.get(&id) {
                let entry = Arc::clone(entry.value());
                let account = entry.lock().account.clone();
                accounts.push(account);
            }
        }
        Ok(accounts)
    }

    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError> {
        Ok(self.accounts.contains_key(&account_id))
    }

    async fn record_balance(
        &self,
        account_id: AccountId,
        balance: Decimal,
        as_of: TransactionId,
    ) -> Result<(), LedgerError> {
        let entry = self
            .accounts
            .get(&account_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or(LedgerError::NotFound(account_id))?;

        let mut entry = entry.lock();
        if entry.as_of.is_some_and(|watermark| watermark >= as_of) {
            debug!(
                account_id = %account_id,
                as_of = %as_of,
                "Stale balance refresh dropped"
            );
            return Ok(());
        }
        entry.account.balance = balance;
        entry.as_of = Some(as_of);
        Ok(())
    }
}
