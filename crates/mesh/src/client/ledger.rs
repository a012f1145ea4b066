//! HTTP client for the ledger store service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_core::{LedgerError, LedgerReceipt, LedgerStore, TransactionRecord, TransferReceipt};
use tally_shared::AccountId;

use super::{decode, decode_empty, transport_error};
use crate::wire::{BalanceResponse, MutationRequest, OpenAccountRequest, TransferRequest};

/// Remote binding of [`LedgerStore`] over the internal HTTP surface.
///
/// The atomicity of `transfer` lives entirely in the ledger service; once
/// that service accepts the request the pair applies even if this caller
/// goes away.
#[derive(Clone)]
pub struct HttpLedgerStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpLedgerStore {
    /// Creates a client for the ledger service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LedgerStore for HttpLedgerStore {
    async fn open(
        &self,
        account_id: AccountId,
        initial_balance: Decimal,
    ) -> Result<(), LedgerError> {
        let response = self
            .http
            .post(self.url("/internal/ledger/accounts"))
            .json(&OpenAccountRequest {
                account_id,
                initial_balance,
            })
            .send()
            .await
            .map_err(transport_error)?;
        decode_empty(response).await
    }

    async fn credit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError> {
        let response = self
            .http
            .post(self.url(&format!("/internal/ledger/accounts/{account_id}/credit")))
            .json(&MutationRequest {
                amount,
                description,
            })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn debit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerReceipt, LedgerError> {
        let response = self
            .http
            .post(self.url(&format!("/internal/ledger/accounts/{account_id}/debit")))
            .json(&MutationRequest {
                amount,
                description,
            })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<TransferReceipt, LedgerError> {
        let response = self
            .http
            .post(self.url("/internal/ledger/transfers"))
            .json(&TransferRequest {
                from,
                to,
                amount,
                description,
            })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn list_transactions(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        let response = self
            .http
            .get(self.url(&format!(
                "/internal/ledger/accounts/{account_id}/transactions"
            )))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        let response = self
            .http
            .get(self.url(&format!("/internal/ledger/accounts/{account_id}/balance")))
            .send()
            .await
            .map_err(transport_error)?;
        let body: BalanceResponse = decode(response).await?;
        Ok(body.balance)
    }
}
