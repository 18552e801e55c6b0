//! Client boundary to the external attestation ledger.
//!
//! The ledger is opaque infrastructure: an append-only, consensus-ordered
//! store keyed by certificate hash. This crate owns everything that touches
//! it — signer discovery, cost estimation, atomic batch append with a cost
//! ceiling, and read-only lookups — behind the [`LedgerClient`] trait.
//!
//! Two implementations are provided: [`RpcLedgerClient`] speaks JSON-RPC to
//! a ledger node over HTTP, and [`InMemoryLedgerClient`] backs tests and
//! local demos with the same contract semantics.

pub mod config;
pub mod entry;
pub mod error;
pub mod memory;
pub mod rpc;
pub mod traits;

pub use config::LedgerConfig;
pub use entry::{BatchConfirmation, ChainInfo, LedgerEntry};
pub use error::{LedgerError, LedgerResult};
pub use memory::{CallCounts, InMemoryLedgerClient, Submission};
pub use rpc::RpcLedgerClient;
pub use traits::LedgerClient;
