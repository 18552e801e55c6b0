//! Canonical serialization and content hashing for certificate records.
//!
//! The canonical byte form of a [`Record`](pramaan_types::Record) is unique
//! for a given field→value mapping regardless of how the record was
//! constructed or parsed; its domain-separated BLAKE3 digest is the
//! [`CertificateHash`](pramaan_types::CertificateHash) used as the ledger
//! key. Issuance and verification both go through this crate — there is no
//! second serialization path.

pub mod canonical;
pub mod hasher;

pub use canonical::{canonical_bytes, CanonicalError};
pub use hasher::RecordHasher;
