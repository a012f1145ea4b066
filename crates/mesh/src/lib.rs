//! Mesh topology bindings.
//!
//! The mesh splits the layered stack into three processes: the account
//! directory service, the ledger store service, and the gateway. This crate
//! holds both sides of that split:
//! - `service`: axum routers that expose an in-process directory or ledger
//!   over an internal HTTP surface
//! - `client`: reqwest-backed implementations of the core capability traits
//!   that the gateway's coordinator binds to
//!
//! Errors cross the internal wire as the serialized [`tally_core::LedgerError`]
//! itself, so a client reconstructs the exact variant. Transport failures
//! become `Unavailable`, the only retry-eligible class.

pub mod client;
pub mod service;
pub mod wire;

pub use client::{HttpAccountDirectory, HttpLedgerStore};
