//! HTTP client for the account directory service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_core::{Account, AccountDirectory, LedgerError};
use tally_shared::{AccountId, TransactionId};

use super::{decode, decode_empty, transport_error};
use crate::wire::{CreateAccountRequest, ExistsResponse, RecordBalanceRequest};

/// Remote binding of [`AccountDirectory`] over the internal HTTP surface.
#[derive(Clone)]
pub struct HttpAccountDirectory {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAccountDirectory {
    /// Creates a client for the directory service at `base_url`.
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
impl AccountDirectory for HttpAccountDirectory {
    async fn create(
        &self,
        name: String,
        email: String,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let response = self
            .http
            .post(self.url("/internal/accounts"))
            .json(&CreateAccountRequest {
                name,
                email,
                initial_balance,
            })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn get(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        let response = self
            .http
            .get(self.url(&format!("/internal/accounts/{account_id}")))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn list(&self) -> Result<Vec<Account>, LedgerError> {
        let response = self
            .http
            .get(self.url("/internal/accounts"))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError> {
        let response = self
            .http
            .get(self.url(&format!("/internal/accounts/{account_id}/exists")))
            .send()
            .await
            .map_err(transport_error)?;
        let body: ExistsResponse = decode(response).await?;
        Ok(body.exists)
    }

    async fn record_balance(
        &self,
        account_id: AccountId,
        balance: Decimal,
        as_of: TransactionId,
    ) -> Result<(), LedgerError> {
        let response = self
            .http
            .put(self.url(&format!("/internal/accounts/{account_id}/balance")))
            .json(&RecordBalanceRequest { balance, as_of })
            .send()
            .await
            .map_err(transport_error)?;
        decode_empty(response).await
    }
}
