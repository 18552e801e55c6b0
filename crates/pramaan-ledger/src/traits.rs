use async_trait::async_trait;

use pramaan_types::{Address, CertificateHash, CostUnits, UnitPrice};

use crate::entry::{BatchConfirmation, ChainInfo, LedgerEntry};
use crate::error::LedgerResult;

/// Client boundary to the external attestation ledger.
///
/// All serialization of conflicting writes is the ledger's own concern;
/// implementations hold no caller-visible mutable state, so one client may
/// be shared across any number of concurrent ingestion and verification
/// tasks. Every method is a bounded, explicit call; a timeout surfaces as
/// [`LedgerError::Unavailable`](crate::LedgerError::Unavailable), never as a
/// silent success or failure.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Identities authorized to submit batches, default signer first.
    async fn list_signers(&self) -> LedgerResult<Vec<Address>>;

    /// Dry-run cost of appending `hashes` as one transaction.
    ///
    /// Must precede [`append_batch`](Self::append_batch): the ledger
    /// enforces a per-transaction cost ceiling and rejects outright when the
    /// ceiling provided is below actual cost.
    async fn estimate_cost(
        &self,
        hashes: &[CertificateHash],
        signer: Address,
    ) -> LedgerResult<CostUnits>;

    /// Append all `hashes` atomically as one ledger transaction.
    ///
    /// Either every hash becomes visible as a [`LedgerEntry`] or none do;
    /// atomicity is the ledger's guarantee, not re-implemented here.
    async fn append_batch(
        &self,
        hashes: &[CertificateHash],
        signer: Address,
        cost_ceiling: CostUnits,
        unit_price: UnitPrice,
    ) -> LedgerResult<BatchConfirmation>;

    /// Read-only point query for one certificate hash.
    ///
    /// An unrecorded hash is `exists = false`, not an error.
    async fn lookup(&self, hash: &CertificateHash) -> LedgerResult<LedgerEntry>;

    /// Contract address and network identifier of the connected ledger.
    async fn chain_info(&self) -> LedgerResult<ChainInfo>;
}
