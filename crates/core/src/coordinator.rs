//! Transaction coordinator: orchestrates every operation the gateway
//! exposes.
//!
//! The coordinator validates, applies, and records. It is written against
//! the capability traits only, so the same code runs in-process (layered
//! topology) and over remote clients (mesh topology). Validation rejections
//! and apply-stage failures stay distinguishable through the error class:
//! a rejection is client-caused, an `Unavailable` means a valid request
//! could not currently be processed.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::{AccountId, TransactionId};
use tracing::{info, warn};

use crate::directory::AccountDirectory;
use crate::error::LedgerError;
use crate::ledger::LedgerStore;
use crate::types::{Account, LedgerReceipt, TransactionRecord, TransferReceipt};
use crate::validator::Validator;

/// Orchestrates deposits, withdrawals and transfers over the capability
/// traits.
#[derive(Clone)]
pub struct Coordinator {
    directory: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn LedgerStore>,
    validator: Validator,
}

impl Coordinator {
    /// Wires a coordinator over the given directory and ledger bindings.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>, ledger: Arc<dyn LedgerStore>) -> Self {
        let validator = Validator::new(Arc::clone(&directory));
        Self {
            directory,
            ledger,
            validator,
        }
    }

    /// Creates an account in the directory and registers it with the ledger.
    pub async fn create_account(
        &self,
        name: String,
        email: String,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let account = self
            .directory
            .create(name, email, initial_balance)
            .await?;
        self.ledger.open(account.id, initial_balance).await?;
        info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Fetches an account.
    pub async fn get_account(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.directory.get(account_id).await
    }

    /// Lists all accounts in creation order.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.directory.list().await
    }

    /// Lists an account's transaction records in insertion order.
    pub async fn list_transactions(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        self.ledger.list_transactions(account_id).await
    }

    /// Deposits `amount` into an account.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.validator.validate_amount(amount)?;
        let description = description.unwrap_or_else(|| "Deposit".to_string());
        let receipt = self.ledger.credit(account_id, amount, description).await?;
        self.refresh_snapshot(account_id, receipt.balance, receipt.record.id)
            .await;
        info!(
            account_id = %account_id,
            transaction_id = %receipt.record.id,
            "Deposit applied"
        );
        Ok(receipt)
    }

    /// Withdraws `amount` from an account.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<LedgerReceipt, LedgerError> {
        self.validator.validate_amount(amount)?;
        let description = description.unwrap_or_else(|| "Withdrawal".to_string());
        let receipt = self.ledger.debit(account_id, amount, description).await?;
        self.refresh_snapshot(account_id, receipt.balance, receipt.record.id)
            .await;
        info!(
            account_id = %account_id,
            transaction_id = %receipt.record.id,
            "Withdrawal applied"
        );
        Ok(receipt)
    }

    /// Transfers `amount` between two accounts.
    ///
    /// The advisory validation fails fast on stale data; the ledger store's
    /// atomic transfer is the binding step and collapses the debit/credit
    /// pair into one indivisible action.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<TransferReceipt, LedgerError> {
        self.validator.validate_amount(amount)?;
        self.validator.validate_transfer(from, to, amount).await?;

        let receipt = self.ledger.transfer(from, to, amount, description).await?;
        self.refresh_snapshot(from, receipt.from_balance, receipt.debit.id)
            .await;
        self.refresh_snapshot(to, receipt.to_balance, receipt.credit.id)
            .await;
        info!(
            from = %from,
            to = %to,
            debit_id = %receipt.debit.id,
            credit_id = %receipt.credit.id,
            "Transfer applied"
        );
        Ok(receipt)
    }

    /// Pushes a balance snapshot to the directory.
    ///
    /// Best-effort: the mutation has already committed, so a failed refresh
    /// only leaves the snapshot stale. The watermark inside the directory
    /// keeps concurrent refreshes from regressing it.
    async fn refresh_snapshot(&self, account_id: AccountId, balance: Decimal, as_of: TransactionId) {
        if let Err(err) = self
            .directory
            .record_balance(account_id, balance, as_of)
            .await
        {
            warn!(
                account_id = %account_id,
                error = %err,
                "Balance snapshot refresh failed; directory view is stale"
            );
        }
    }
}
