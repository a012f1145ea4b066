//! Internal service routers for the mesh topology.
//!
//! Each router wraps an in-process store implementation and exposes it to
//! the gateway over HTTP. Both routers are transport shims only: every
//! precondition still lives in the store behind them.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tally_core::LedgerError;

use crate::wire::WireError;

pub mod accounts;
pub mod ledger;

pub use accounts::account_service_router;
pub use ledger::ledger_service_router;

/// Maps a ledger error to the internal wire envelope.
pub(crate) fn wire_error(err: &LedgerError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(WireError::from(err))).into_response()
}
