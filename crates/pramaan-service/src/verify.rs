use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pramaan_crypto::RecordHasher;
use pramaan_ledger::LedgerClient;
use pramaan_types::{Address, CertificateHash, Record};

use crate::error::ServiceResult;

/// Result of checking one candidate record against the ledger.
///
/// `timestamp` and `issuer` are populated only for a valid record; a record
/// the ledger has never seen is a legitimate negative result, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub valid: bool,
    pub timestamp: Option<u64>,
    pub issuer: Option<Address>,
    pub candidate_hash: CertificateHash,
}

/// Read-only attestation checks against the ledger.
///
/// Uses the identical canonicalization and hashing path as ingestion, so a
/// record verifies if and only if its exact field values were ingested.
/// Safe to call concurrently and repeatedly; nothing is written anywhere.
pub struct VerificationService<C> {
    client: Arc<C>,
    hasher: RecordHasher,
}

impl<C: LedgerClient> VerificationService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            hasher: RecordHasher::CERTIFICATE,
        }
    }

    pub async fn verify(&self, record: &Record) -> ServiceResult<VerificationOutcome> {
        let candidate_hash = self.hasher.hash_record(record)?;
        let entry = self.client.lookup(&candidate_hash).await?;
        tracing::debug!(
            "verification of {candidate_hash:?}: {}",
            if entry.exists { "recorded" } else { "not recorded" }
        );
        let (timestamp, issuer) = if entry.exists {
            (Some(entry.timestamp), entry.issuer)
        } else {
            (None, None)
        };
        Ok(VerificationOutcome {
            valid: entry.exists,
            timestamp,
            issuer,
            candidate_hash,
        })
    }
}
