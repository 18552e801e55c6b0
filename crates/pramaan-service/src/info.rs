use serde::{Deserialize, Serialize};

use pramaan_ledger::LedgerClient;
use pramaan_types::Address;

use crate::error::ServiceResult;

/// Read-only snapshot of the ledger connection for the info surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub contract: Address,
    /// Default submitting identity, when the ledger lists any.
    pub signer: Option<Address>,
    pub network: String,
}

/// Current contract address, active signer, and network identifier.
pub async fn service_info<C: LedgerClient>(client: &C) -> ServiceResult<ServiceInfo> {
    let chain = client.chain_info().await?;
    let signer = client.list_signers().await?.into_iter().next();
    Ok(ServiceInfo {
        contract: chain.contract,
        signer,
        network: chain.network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pramaan_ledger::InMemoryLedgerClient;

    #[tokio::test]
    async fn reports_contract_signer_and_network() {
        let ledger = InMemoryLedgerClient::new();
        let info = service_info(&ledger).await.unwrap();
        assert_eq!(info.network, "pramaan-dev");
        assert_eq!(info.signer, Some(Address::from_raw([0xA1; 20])));
        assert!(!info.contract.is_zero());
    }

    #[tokio::test]
    async fn no_signers_is_not_an_error_here() {
        let ledger = InMemoryLedgerClient::with_signers(vec![]);
        let info = service_info(&ledger).await.unwrap();
        assert!(info.signer.is_none());
    }
}
