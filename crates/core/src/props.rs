//! Property-based tests for the ledger engine invariants.
//!
//! - Conservation: transfers never create or destroy money
//! - No negative balance: overdrafts are rejected, balances stay >= 0
//! - Record pairing: every successful transfer yields a matched
//!   debit/credit pair

use futures::executor::block_on;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::AccountId;

use crate::error::LedgerError;
use crate::ledger::{InMemoryLedger, LedgerStore};
use crate::types::TransactionKind;

/// Strategy for positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-negative opening balances (0 to 5,000.00).
fn opening_balance() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A randomly directed transfer between two of the first three accounts.
#[derive(Debug, Clone)]
struct TransferOp {
    from: usize,
    to: usize,
    amount: Decimal,
}

fn transfer_op() -> impl Strategy<Value = TransferOp> {
    (0usize..3, 0usize..3, positive_amount()).prop_map(|(from, to, amount)| TransferOp {
        from,
        to,
        amount,
    })
}

fn open_accounts(ledger: &InMemoryLedger, balances: &[Decimal]) -> Vec<AccountId> {
    balances
        .iter()
        .map(|balance| {
            let id = AccountId::new();
            block_on(ledger.open(id, *balance)).unwrap();
            id
        })
        .collect()
}

fn total_balance(ledger: &InMemoryLedger, ids: &[AccountId]) -> Decimal {
    ids.iter()
        .map(|id| block_on(ledger.balance(*id)).unwrap())
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any sequence of transfers with no deposits or withdrawals
    /// interleaved, the sum of all balances is unchanged.
    #[test]
    fn prop_transfers_conserve_total(
        balances in prop::collection::vec(opening_balance(), 3),
        ops in prop::collection::vec(transfer_op(), 0..40),
    ) {
        let ledger = InMemoryLedger::new();
        let ids = open_accounts(&ledger, &balances);
        let total_before = total_balance(&ledger, &ids);

        for op in ops {
            // Failures (same account, insufficient funds) must leave the
            // total unchanged too, so we ignore the result on purpose.
            let _ = block_on(ledger.transfer(ids[op.from], ids[op.to], op.amount, None));
        }

        prop_assert_eq!(total_balance(&ledger, &ids), total_before);
    }

    /// No reachable state has a negative balance.
    #[test]
    fn prop_balances_never_negative(
        balances in prop::collection::vec(opening_balance(), 3),
        ops in prop::collection::vec(transfer_op(), 0..40),
    ) {
        let ledger = InMemoryLedger::new();
        let ids = open_accounts(&ledger, &balances);

        for op in ops {
            let _ = block_on(ledger.transfer(ids[op.from], ids[op.to], op.amount, None));
            for id in &ids {
                prop_assert!(block_on(ledger.balance(*id)).unwrap() >= Decimal::ZERO);
            }
        }
    }

    /// A debit that would overdraw is rejected and leaves the balance alone.
    #[test]
    fn prop_overdraft_rejected(
        balance in opening_balance(),
        extra in positive_amount(),
    ) {
        let ledger = InMemoryLedger::new();
        let ids = open_accounts(&ledger, &[balance]);

        let result = block_on(ledger.debit(ids[0], balance + extra, "Withdrawal".into()));
        let is_insufficient = matches!(result, Err(LedgerError::InsufficientFunds { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(block_on(ledger.balance(ids[0])).unwrap(), balance);
    }

    /// Every successful transfer yields exactly one debit and one credit
    /// record with equal amounts and matching timestamps.
    #[test]
    fn prop_transfer_records_paired(
        balance in opening_balance(),
        amount in positive_amount(),
    ) {
        let ledger = InMemoryLedger::new();
        let ids = open_accounts(&ledger, &[balance + amount, Decimal::ZERO]);

        let receipt = block_on(ledger.transfer(ids[0], ids[1], amount, None)).unwrap();
        prop_assert_eq!(receipt.debit.kind, TransactionKind::Debit);
        prop_assert_eq!(receipt.credit.kind, TransactionKind::Credit);
        prop_assert_eq!(receipt.debit.amount, receipt.credit.amount);
        prop_assert_eq!(receipt.debit.timestamp, receipt.credit.timestamp);
        prop_assert_ne!(receipt.debit.id, receipt.credit.id);

        let source_log = block_on(ledger.list_transactions(ids[0])).unwrap();
        let dest_log = block_on(ledger.list_transactions(ids[1])).unwrap();
        prop_assert_eq!(source_log.len(), 1);
        prop_assert_eq!(dest_log.len(), 1);
    }
}
