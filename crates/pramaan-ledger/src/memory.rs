use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use pramaan_types::{Address, CertificateHash, CostUnits, TxId, UnitPrice};

use crate::entry::{BatchConfirmation, ChainInfo, LedgerEntry};
use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;

/// Flat per-transaction cost, independent of batch size.
const BASE_COST: u64 = 500;
/// Additional cost per appended hash.
const COST_PER_HASH: u64 = 120;

/// In-memory ledger client for tests, local demos, and embedding.
///
/// Implements the same contract semantics as the real node: atomic batch
/// append with ceiling enforcement, append-only entries, read-only lookups.
/// Every call is counted, so tests can assert which ledger operations a
/// caller performed, or that none were.
pub struct InMemoryLedgerClient {
    signers: Vec<Address>,
    network: String,
    contract: Address,
    offline: AtomicBool,
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    entries: HashMap<CertificateHash, (u64, Address)>,
    submissions: Vec<Submission>,
    calls: CallCounts,
}

/// Number of invocations of each [`LedgerClient`] operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_signers: u64,
    pub estimate_cost: u64,
    pub append_batch: u64,
    pub lookup: u64,
    pub chain_info: u64,
}

impl CallCounts {
    pub fn total(&self) -> u64 {
        self.list_signers + self.estimate_cost + self.append_batch + self.lookup + self.chain_info
    }
}

/// One accepted batch submission, as the ledger saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub hashes: Vec<CertificateHash>,
    pub signer: Address,
    pub cost_ceiling: CostUnits,
    pub unit_price: UnitPrice,
    pub tx_id: TxId,
}

impl InMemoryLedgerClient {
    pub fn new() -> Self {
        Self::with_signers(vec![Address::from_raw([0xA1; 20])])
    }

    pub fn with_signers(signers: Vec<Address>) -> Self {
        Self {
            signers,
            network: "pramaan-dev".into(),
            contract: Address::from_raw([0x01; 20]),
            offline: AtomicBool::new(false),
            inner: RwLock::new(State::default()),
        }
    }

    /// Make every subsequent call fail with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Invocation counts per operation.
    pub fn calls(&self) -> CallCounts {
        self.inner.read().expect("client state poisoned").calls
    }

    /// Accepted submissions, in arrival order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.inner
            .read()
            .expect("client state poisoned")
            .submissions
            .clone()
    }

    pub fn entry_count(&self) -> usize {
        self.inner.read().expect("client state poisoned").entries.len()
    }

    fn check_online(&self, op: &'static str) -> LedgerResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable {
                op,
                reason: "node offline".into(),
            });
        }
        Ok(())
    }

    fn write_state(&self, op: &'static str) -> LedgerResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.inner.write().map_err(|_| LedgerError::Unavailable {
            op,
            reason: "client state poisoned".into(),
        })
    }

    fn cost_of(hashes: &[CertificateHash]) -> CostUnits {
        CostUnits::new(BASE_COST + COST_PER_HASH * hashes.len() as u64)
    }

    fn synth_tx_id(index: u64) -> TxId {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&index.to_be_bytes());
        TxId::from_raw(bytes)
    }
}

impl Default for InMemoryLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[async_trait]
impl LedgerClient for InMemoryLedgerClient {
    async fn list_signers(&self) -> LedgerResult<Vec<Address>> {
        self.write_state("list_signers")?.calls.list_signers += 1;
        self.check_online("list_signers")?;
        Ok(self.signers.clone())
    }

    async fn estimate_cost(
        &self,
        hashes: &[CertificateHash],
        _signer: Address,
    ) -> LedgerResult<CostUnits> {
        self.write_state("estimate_cost")?.calls.estimate_cost += 1;
        self.check_online("estimate_cost")?;
        Ok(Self::cost_of(hashes))
    }

    async fn append_batch(
        &self,
        hashes: &[CertificateHash],
        signer: Address,
        cost_ceiling: CostUnits,
        unit_price: UnitPrice,
    ) -> LedgerResult<BatchConfirmation> {
        self.write_state("append_batch")?.calls.append_batch += 1;
        self.check_online("append_batch")?;

        if hashes.is_empty() {
            return Err(LedgerError::SubmissionRejected("empty batch".into()));
        }
        let actual = Self::cost_of(hashes);
        if cost_ceiling < actual {
            return Err(LedgerError::SubmissionRejected(format!(
                "cost ceiling {cost_ceiling} below actual cost {actual}"
            )));
        }

        // All-or-nothing: nothing below can fail partway.
        let mut state = self.write_state("append_batch")?;
        let timestamp = unix_now();
        for hash in hashes {
            state.entries.insert(*hash, (timestamp, signer));
        }
        let tx_id = Self::synth_tx_id(state.submissions.len() as u64 + 1);
        state.submissions.push(Submission {
            hashes: hashes.to_vec(),
            signer,
            cost_ceiling,
            unit_price,
            tx_id,
        });
        Ok(BatchConfirmation {
            tx_id,
            cost_consumed: actual,
        })
    }

    async fn lookup(&self, hash: &CertificateHash) -> LedgerResult<LedgerEntry> {
        let found = {
            let mut state = self.write_state("lookup")?;
            state.calls.lookup += 1;
            state.entries.get(hash).copied()
        };
        self.check_online("lookup")?;
        Ok(match found {
            Some((timestamp, issuer)) => LedgerEntry::recorded(timestamp, issuer),
            None => LedgerEntry::absent(),
        })
    }

    async fn chain_info(&self) -> LedgerResult<ChainInfo> {
        self.write_state("chain_info")?.calls.chain_info += 1;
        self.check_online("chain_info")?;
        Ok(ChainInfo {
            contract: self.contract,
            network: self.network.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashes(n: u8) -> Vec<CertificateHash> {
        (0..n).map(|i| CertificateHash::from_hash([i; 32])).collect()
    }

    fn signer() -> Address {
        Address::from_raw([0xA1; 20])
    }

    #[tokio::test]
    async fn append_then_lookup() {
        let ledger = InMemoryLedgerClient::new();
        let batch = hashes(2);
        let estimate = ledger.estimate_cost(&batch, signer()).await.unwrap();
        let confirmation = ledger
            .append_batch(&batch, signer(), estimate.with_margin(20), UnitPrice::new(50))
            .await
            .unwrap();
        assert_eq!(confirmation.cost_consumed, estimate);

        let entry = ledger.lookup(&batch[0]).await.unwrap();
        assert!(entry.exists);
        assert_eq!(entry.issuer, Some(signer()));
        assert!(entry.timestamp > 0);
    }

    #[tokio::test]
    async fn lookup_of_unknown_hash_is_absent_not_error() {
        let ledger = InMemoryLedgerClient::new();
        let entry = ledger.lookup(&CertificateHash::from_hash([9; 32])).await.unwrap();
        assert_eq!(entry, LedgerEntry::absent());
    }

    #[tokio::test]
    async fn ceiling_below_cost_rejects_whole_batch() {
        let ledger = InMemoryLedgerClient::new();
        let batch = hashes(3);
        let err = ledger
            .append_batch(&batch, signer(), CostUnits::new(1), UnitPrice::new(50))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::SubmissionRejected(_)));
        // Atomic rejection: no partial entries.
        assert_eq!(ledger.entry_count(), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_by_ledger() {
        let ledger = InMemoryLedgerClient::new();
        let err = ledger
            .append_batch(&[], signer(), CostUnits::new(10_000), UnitPrice::new(50))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::SubmissionRejected(_)));
    }

    #[tokio::test]
    async fn offline_surfaces_unavailable_for_every_op() {
        let ledger = InMemoryLedgerClient::new();
        ledger.set_offline(true);
        assert!(ledger.list_signers().await.unwrap_err().is_retryable());
        assert!(ledger
            .lookup(&CertificateHash::from_hash([0; 32]))
            .await
            .unwrap_err()
            .is_retryable());
        assert!(ledger.chain_info().await.unwrap_err().is_retryable());
    }

    #[tokio::test]
    async fn calls_are_counted() {
        let ledger = InMemoryLedgerClient::new();
        ledger.list_signers().await.unwrap();
        ledger.lookup(&CertificateHash::from_hash([0; 32])).await.unwrap();
        ledger.lookup(&CertificateHash::from_hash([1; 32])).await.unwrap();
        let calls = ledger.calls();
        assert_eq!(calls.list_signers, 1);
        assert_eq!(calls.lookup, 2);
        assert_eq!(calls.append_batch, 0);
        assert_eq!(calls.total(), 3);
    }

    #[tokio::test]
    async fn submissions_record_ceiling_and_price() {
        let ledger = InMemoryLedgerClient::new();
        let batch = hashes(1);
        let estimate = ledger.estimate_cost(&batch, signer()).await.unwrap();
        ledger
            .append_batch(&batch, signer(), estimate.with_margin(20), UnitPrice::new(50))
            .await
            .unwrap();
        let submissions = ledger.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].cost_ceiling, estimate.with_margin(20));
        assert_eq!(submissions[0].unit_price, UnitPrice::new(50));
    }

    #[tokio::test]
    async fn tx_ids_are_distinct_per_submission() {
        let ledger = InMemoryLedgerClient::new();
        let mut tx_ids = Vec::new();
        for batch in [hashes(1), hashes(2)] {
            let estimate = ledger.estimate_cost(&batch, signer()).await.unwrap();
            let confirmation = ledger
                .append_batch(&batch, signer(), estimate.with_margin(20), UnitPrice::new(50))
                .await
                .unwrap();
            tx_ids.push(confirmation.tx_id);
        }
        assert_ne!(tx_ids[0], tx_ids[1]);
    }

    #[tokio::test]
    async fn resubmission_re_records_entries() {
        // Overlap behavior is a ledger contract detail; this double re-records.
        let ledger = InMemoryLedgerClient::new();
        let batch = hashes(1);
        for _ in 0..2 {
            let estimate = ledger.estimate_cost(&batch, signer()).await.unwrap();
            ledger
                .append_batch(&batch, signer(), estimate.with_margin(20), UnitPrice::new(50))
                .await
                .unwrap();
        }
        assert_eq!(ledger.entry_count(), 1);
        assert_eq!(ledger.submissions().len(), 2);
    }
}
