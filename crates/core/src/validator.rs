//! Pre-flight validation for ledger mutations.
//!
//! The validator exists to fail fast and produce a useful client-facing
//! message. In the mesh topology its account view comes from the directory
//! service and may be stale, so the funds check here is advisory only; the
//! ledger store's own debit precondition is the binding gate against
//! overdraft.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::AccountId;

use crate::directory::AccountDirectory;
use crate::error::LedgerError;

/// Per-transaction amount policy limit.
pub const MAX_TRANSACTION_AMOUNT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Stateless-per-call validation over a possibly stale account view.
#[derive(Clone)]
pub struct Validator {
    directory: Arc<dyn AccountDirectory>,
    max_amount: Decimal,
}

impl Validator {
    /// Creates a validator reading from the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self {
            directory,
            max_amount: MAX_TRANSACTION_AMOUNT,
        }
    }

    /// Overrides the amount limit. Used by tests and policy experiments.
    #[must_use]
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = max_amount;
        self
    }

    /// Checks amount bounds: positive and within the policy limit.
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if amount > self.max_amount {
            return Err(LedgerError::AmountAboveLimit {
                amount,
                limit: self.max_amount,
            });
        }
        Ok(())
    }

    /// Checks cross-account transfer preconditions.
    ///
    /// Distinct accounts, both known to the directory, and the source's
    /// known balance covers the amount. The funds check reads the snapshot
    /// and is advisory; a pass here does not guarantee the transfer applies.
    pub async fn validate_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SameAccount(from));
        }

        let source = self.directory.get(from).await?;
        if !self.directory.exists(to).await? {
            return Err(LedgerError::NotFound(to));
        }

        if source.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: source.balance,
                requested: amount,
            });
        }
        Ok(())
    }
}
