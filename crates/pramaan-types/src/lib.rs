//! Foundation types for the Pramaan certificate vault.
//!
//! This crate provides the record, identifier, and cost-metering types used
//! throughout the Pramaan system. Every other Pramaan crate depends on
//! `pramaan-types`.
//!
//! # Key Types
//!
//! - [`Record`] — One certificate's attributes as a fixed six-field record
//! - [`CertificateHash`] — Content-addressed ledger key (256-bit hash)
//! - [`Address`] — Ledger account or contract identity
//! - [`TxId`] — Ledger transaction identifier
//! - [`CostUnits`] / [`UnitPrice`] / [`Fee`] — Distinct cost-metering units

pub mod error;
pub mod fee;
pub mod hash;
pub mod identity;
pub mod record;

pub use error::TypeError;
pub use fee::{CostUnits, Fee, UnitPrice};
pub use hash::{CertificateHash, TxId};
pub use identity::Address;
pub use record::Record;
