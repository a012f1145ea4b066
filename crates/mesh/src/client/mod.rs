//! HTTP clients implementing the core capability traits.
//!
//! The gateway's coordinator binds to these instead of the in-memory
//! stores. Service-reported errors deserialize back into the exact
//! `LedgerError` variant; anything that breaks at the transport layer
//! (connection refused, timeout, malformed body) becomes `Unavailable`.

use serde::de::DeserializeOwned;
use tally_core::LedgerError;

use crate::wire::WireError;

pub mod accounts;
pub mod ledger;

pub use accounts::HttpAccountDirectory;
pub use ledger::HttpLedgerStore;

/// Maps a reqwest transport failure to `Unavailable`.
pub(crate) fn transport_error(err: reqwest::Error) -> LedgerError {
    LedgerError::Unavailable(err.to_string())
}

/// Decodes a successful body, or reconstructs the service's error.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LedgerError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| LedgerError::Unavailable(format!("malformed response: {e}")))
    } else {
        match response.json::<WireError>().await {
            Ok(wire) => Err(wire.error),
            Err(e) => Err(LedgerError::Unavailable(format!(
                "service returned {status}: {e}"
            ))),
        }
    }
}

/// Like [`decode`] for endpoints that answer 204 with no body.
pub(crate) async fn decode_empty(response: reqwest::Response) -> Result<(), LedgerError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        match response.json::<WireError>().await {
            Ok(wire) => Err(wire.error),
            Err(e) => Err(LedgerError::Unavailable(format!(
                "service returned {status}: {e}"
            ))),
        }
    }
}
