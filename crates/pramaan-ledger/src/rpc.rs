use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use pramaan_types::{Address, CertificateHash, CostUnits, TxId, UnitPrice};

use crate::config::LedgerConfig;
use crate::entry::{BatchConfirmation, ChainInfo, LedgerEntry};
use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;

/// JSON-RPC 2.0 client for an attestation ledger node over HTTP.
///
/// One instance per process; construction probes the node so a dead
/// endpoint fails at startup rather than at first request.
#[derive(Debug)]
pub struct RpcLedgerClient {
    http: reqwest::Client,
    endpoint: String,
    contract: Address,
    next_id: AtomicU64,
}

/// How to interpret a node-side RPC error for a given call.
///
/// A submit call that the node executed and refused is a rejection the
/// caller must act on; a read call the node refuses is a node problem and
/// therefore retryable.
#[derive(Clone, Copy)]
enum CallKind {
    Read,
    Submit,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireConfirmation {
    tx_id: TxId,
    cost_consumed: CostUnits,
}

#[derive(Deserialize)]
struct WireEntry {
    exists: bool,
    #[serde(default)]
    timestamp: u64,
    #[serde(default)]
    issuer: Option<Address>,
}

impl RpcLedgerClient {
    /// Connect to the node described by `config` and probe it.
    pub async fn connect(config: &LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LedgerError::Config(format!("cannot build http client: {e}")))?;
        let client = Self {
            http,
            endpoint: config.endpoint.clone(),
            contract: config.contract,
            next_id: AtomicU64::new(1),
        };
        let network = client.network_id().await?;
        tracing::info!(
            "connected to ledger {} (network {network}, contract {})",
            client.endpoint,
            client.contract
        );
        Ok(client)
    }

    async fn call(
        &self,
        op: &'static str,
        kind: CallKind,
        method: &str,
        params: Value,
    ) -> LedgerResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!("ledger call {method} (op {op}, id {id})");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(op, &e))?
            .error_for_status()
            .map_err(|e| transport_error(op, &e))?;

        let body: RpcResponse = response.json().await.map_err(|e| LedgerError::BadResponse {
            op,
            reason: e.to_string(),
        })?;

        if let Some(err) = body.error {
            return Err(node_error(op, kind, &err));
        }
        body.result.ok_or(LedgerError::BadResponse {
            op,
            reason: "response carries neither result nor error".into(),
        })
    }

    async fn network_id(&self) -> LedgerResult<String> {
        let result = self
            .call("chain_info", CallKind::Read, "cert_networkId", json!([]))
            .await?;
        decode(result, "chain_info")
    }

    fn hash_params(&self, hashes: &[CertificateHash], signer: Address) -> Value {
        let hex: Vec<String> = hashes.iter().map(CertificateHash::to_hex).collect();
        json!([self.contract.to_hex(), signer.to_hex(), hex])
    }
}

fn transport_error(op: &'static str, err: &reqwest::Error) -> LedgerError {
    let reason = if err.is_timeout() {
        "timed out".into()
    } else {
        err.to_string()
    };
    LedgerError::Unavailable { op, reason }
}

fn node_error(op: &'static str, kind: CallKind, err: &RpcErrorBody) -> LedgerError {
    match kind {
        CallKind::Submit => {
            LedgerError::SubmissionRejected(format!("{} (code {})", err.message, err.code))
        }
        CallKind::Read => LedgerError::Unavailable {
            op,
            reason: format!("node error: {} (code {})", err.message, err.code),
        },
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, op: &'static str) -> LedgerResult<T> {
    serde_json::from_value(value).map_err(|e| LedgerError::BadResponse {
        op,
        reason: e.to_string(),
    })
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn list_signers(&self) -> LedgerResult<Vec<Address>> {
        let result = self
            .call("list_signers", CallKind::Read, "cert_signers", json!([]))
            .await?;
        decode(result, "list_signers")
    }

    async fn estimate_cost(
        &self,
        hashes: &[CertificateHash],
        signer: Address,
    ) -> LedgerResult<CostUnits> {
        let params = self.hash_params(hashes, signer);
        let result = self
            .call("estimate_cost", CallKind::Submit, "cert_estimateBatch", params)
            .await?;
        decode(result, "estimate_cost")
    }

    async fn append_batch(
        &self,
        hashes: &[CertificateHash],
        signer: Address,
        cost_ceiling: CostUnits,
        unit_price: UnitPrice,
    ) -> LedgerResult<BatchConfirmation> {
        let mut params = self.hash_params(hashes, signer);
        if let Value::Array(array) = &mut params {
            array.push(json!(cost_ceiling));
            array.push(json!(unit_price));
        }
        tracing::info!(
            "submitting batch of {} hashes as {} (ceiling {cost_ceiling})",
            hashes.len(),
            signer
        );
        let result = self
            .call("append_batch", CallKind::Submit, "cert_addBatch", params)
            .await?;
        let wire: WireConfirmation = decode(result, "append_batch")?;
        tracing::info!(
            "batch confirmed in tx {} ({} consumed)",
            wire.tx_id,
            wire.cost_consumed
        );
        Ok(BatchConfirmation {
            tx_id: wire.tx_id,
            cost_consumed: wire.cost_consumed,
        })
    }

    async fn lookup(&self, hash: &CertificateHash) -> LedgerResult<LedgerEntry> {
        let params = json!([self.contract.to_hex(), hash.to_hex()]);
        let result = self
            .call("lookup", CallKind::Read, "cert_lookup", params)
            .await?;
        let wire: WireEntry = decode(result, "lookup")?;
        if !wire.exists {
            return Ok(LedgerEntry::absent());
        }
        Ok(LedgerEntry {
            exists: true,
            timestamp: wire.timestamp,
            issuer: wire.issuer.filter(|a| !a.is_zero()),
        })
    }

    async fn chain_info(&self) -> LedgerResult<ChainInfo> {
        let network = self.network_id().await?;
        Ok(ChainInfo {
            contract: self.contract,
            network,
        })
    }
}
