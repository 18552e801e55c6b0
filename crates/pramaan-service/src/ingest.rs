use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pramaan_crypto::RecordHasher;
use pramaan_ledger::{LedgerClient, LedgerError};
use pramaan_types::{Address, CostUnits, Fee, Record, TxId, UnitPrice};

use crate::error::{ServiceError, ServiceResult};

/// Safety margin applied to the cost estimate when deriving the submission
/// ceiling, as a percentage. Absorbs estimate drift between estimation and
/// execution; the ceiling is always `ceil(estimate * 1.2)`.
pub const COST_MARGIN_PERCENT: u64 = 20;

/// Fixed per-unit price offered for batch submissions.
pub const DEFAULT_UNIT_PRICE: UnitPrice = UnitPrice::new(50);

/// Outcome of one confirmed batch ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub hashes_count: usize,
    pub tx_id: TxId,
    pub cost_consumed: CostUnits,
}

/// Turns a parsed record set into one atomic ledger submission.
pub struct BatchIngestor<C> {
    client: Arc<C>,
    hasher: RecordHasher,
    signer_override: Option<Address>,
}

impl<C: LedgerClient> BatchIngestor<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            hasher: RecordHasher::CERTIFICATE,
            signer_override: None,
        }
    }

    /// Submit as `signer` instead of the ledger's first-listed identity.
    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signer_override = Some(signer);
        self
    }

    /// Canonicalize and hash every record in input order, then append the
    /// hash sequence to the ledger as a single transaction.
    ///
    /// Nothing is considered recorded unless the ledger confirms the whole
    /// batch; any failure propagates with no partial local state. Repeated
    /// ingestion of the same records is not deduplicated; layer a per-hash
    /// lookup on top if that is wanted.
    pub async fn ingest(&self, records: &[Record]) -> ServiceResult<IngestReport> {
        if records.is_empty() {
            return Err(ServiceError::validation("empty record batch"));
        }

        let mut hashes = Vec::with_capacity(records.len());
        for record in records {
            hashes.push(self.hasher.hash_record(record)?);
        }

        let signer = match self.signer_override {
            Some(signer) => signer,
            None => *self
                .client
                .list_signers()
                .await?
                .first()
                .ok_or(LedgerError::NoSigners)?,
        };

        let estimate = self.client.estimate_cost(&hashes, signer).await?;
        let ceiling = estimate.with_margin(COST_MARGIN_PERCENT);
        let max_fee = Fee::max_for(ceiling, DEFAULT_UNIT_PRICE);
        tracing::info!(
            "ingesting {} records as {signer} (estimate {estimate}, ceiling {ceiling}, max fee {})",
            records.len(),
            max_fee.get()
        );

        let confirmation = self
            .client
            .append_batch(&hashes, signer, ceiling, DEFAULT_UNIT_PRICE)
            .await?;
        tracing::info!(
            "batch of {} hashes confirmed in tx {}",
            hashes.len(),
            confirmation.tx_id
        );

        Ok(IngestReport {
            hashes_count: hashes.len(),
            tx_id: confirmation.tx_id,
            cost_consumed: confirmation.cost_consumed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_ledger::InMemoryLedgerClient;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("1", "Alice", "CS", "AI", "A", "2024"),
            Record::new("2", "Bob", "CS", "AI", "B", "2024"),
        ]
    }

    #[tokio::test]
    async fn ingest_reports_count_and_tx() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        let ingestor = BatchIngestor::new(ledger.clone());
        let report = ingestor.ingest(&sample_records()).await.unwrap();
        assert_eq!(report.hashes_count, 2);
        assert_eq!(ledger.submissions().len(), 1);
        assert_eq!(report.tx_id, ledger.submissions()[0].tx_id);
    }

    #[tokio::test]
    async fn empty_batch_fails_before_any_ledger_call() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        let ingestor = BatchIngestor::new(ledger.clone());
        let err = ingestor.ingest(&[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(ledger.calls().total(), 0);
    }

    #[tokio::test]
    async fn ceiling_is_estimate_plus_margin() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        let ingestor = BatchIngestor::new(ledger.clone());
        let records = sample_records();
        ingestor.ingest(&records).await.unwrap();

        let submission = &ledger.submissions()[0];
        let estimate = ledger
            .estimate_cost(&submission.hashes, submission.signer)
            .await
            .unwrap();
        assert_eq!(submission.cost_ceiling, estimate.with_margin(20));
        assert!(submission.cost_ceiling >= estimate);
        assert_eq!(submission.unit_price, DEFAULT_UNIT_PRICE);
    }

    #[tokio::test]
    async fn hash_order_follows_input_order() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        let ingestor = BatchIngestor::new(ledger.clone());
        let records = sample_records();
        ingestor.ingest(&records).await.unwrap();

        let expected: Vec<_> = records
            .iter()
            .map(|r| RecordHasher::CERTIFICATE.hash_record(r).unwrap())
            .collect();
        assert_eq!(ledger.submissions()[0].hashes, expected);
    }

    #[tokio::test]
    async fn no_signers_is_surfaced() {
        let ledger = Arc::new(InMemoryLedgerClient::with_signers(vec![]));
        let ingestor = BatchIngestor::new(ledger);
        let err = ingestor.ingest(&sample_records()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::NoSigners)
        ));
    }

    #[tokio::test]
    async fn signer_override_skips_discovery() {
        let ledger = Arc::new(InMemoryLedgerClient::with_signers(vec![]));
        let signer = Address::from_raw([0xBB; 20]);
        let ingestor = BatchIngestor::new(ledger.clone()).with_signer(signer);
        ingestor.ingest(&sample_records()).await.unwrap();
        assert_eq!(ledger.calls().list_signers, 0);
        assert_eq!(ledger.submissions()[0].signer, signer);
    }

    #[tokio::test]
    async fn ledger_failure_claims_no_success() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        ledger.set_offline(true);
        let ingestor = BatchIngestor::new(ledger.clone());
        let err = ingestor.ingest(&sample_records()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(ref e) if e.is_retryable()));
        assert_eq!(ledger.entry_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_ingestion_produces_two_transactions() {
        let ledger = Arc::new(InMemoryLedgerClient::new());
        let ingestor = BatchIngestor::new(ledger.clone());
        let records = sample_records();
        let first = ingestor.ingest(&records).await.unwrap();
        let second = ingestor.ingest(&records).await.unwrap();
        assert_ne!(first.tx_id, second.tx_id);
        assert_eq!(ledger.submissions().len(), 2);
    }
}
