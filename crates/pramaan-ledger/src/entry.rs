use serde::{Deserialize, Serialize};

use pramaan_types::{Address, CostUnits, TxId};

/// The ledger's persisted attestation for one certificate hash.
///
/// Created exactly once per hash by a batch append and never mutated; a hash
/// the ledger has never seen yields `exists = false` with empty metadata,
/// which is a valid negative result rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub exists: bool,
    /// Unix seconds at ledger confirmation time. Zero when absent.
    pub timestamp: u64,
    /// Identity the entry is attributed to. `None` when absent.
    pub issuer: Option<Address>,
}

impl LedgerEntry {
    /// Entry for a hash the ledger has never recorded.
    pub fn absent() -> Self {
        Self {
            exists: false,
            timestamp: 0,
            issuer: None,
        }
    }

    pub fn recorded(timestamp: u64, issuer: Address) -> Self {
        Self {
            exists: true,
            timestamp,
            issuer: Some(issuer),
        }
    }
}

/// Confirmation returned by the ledger for an accepted batch append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfirmation {
    pub tx_id: TxId,
    pub cost_consumed: CostUnits,
}

/// Static facts about the ledger connection, for the info surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Deployed attestation contract the client is bound to.
    pub contract: Address,
    /// Network identifier reported by the ledger node.
    pub network: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entry_is_empty() {
        let entry = LedgerEntry::absent();
        assert!(!entry.exists);
        assert_eq!(entry.timestamp, 0);
        assert!(entry.issuer.is_none());
    }

    #[test]
    fn recorded_entry_keeps_attribution() {
        let issuer = Address::from_raw([9; 20]);
        let entry = LedgerEntry::recorded(1_700_000_000, issuer);
        assert!(entry.exists);
        assert_eq!(entry.issuer, Some(issuer));
    }
}
