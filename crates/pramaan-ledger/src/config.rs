use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pramaan_types::Address;

use crate::error::{LedgerError, LedgerResult};

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Connection parameters for the ledger node, resolved at process start.
///
/// A process with no resolvable endpoint or contract must fail at startup,
/// not at first request. Construct the client from this config before
/// serving anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// HTTP endpoint of the ledger node.
    pub endpoint: String,
    /// Deployed attestation contract.
    pub contract: Address,
    /// Preferred submitting identity; first listed signer when absent.
    #[serde(default)]
    pub signer: Option<Address>,
    /// Per-call deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl LedgerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| LedgerError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.endpoint.is_empty() {
            return Err(LedgerError::Config("empty ledger endpoint".into()));
        }
        if self.contract.is_zero() {
            return Err(LedgerError::Config(
                "contract address is the zero address".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8545".into(),
            contract: Address::from_raw([0x01; 20]),
            signer: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LedgerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint = \"http://ledger.example:8545\"\ncontract = \"0x{}\"",
            "ab".repeat(20)
        )
        .unwrap();
        let config = LedgerConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://ledger.example:8545");
        assert_eq!(config.contract, Address::from_raw([0xAB; 20]));
        assert!(config.signer.is_none());
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = LedgerConfig::load(Path::new("/nonexistent/pramaan.toml")).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn zero_contract_is_rejected() {
        let config = LedgerConfig {
            contract: Address::ZERO,
            ..LedgerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            LedgerError::Config(_)
        ));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let config = LedgerConfig {
            endpoint: String::new(),
            ..LedgerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            LedgerError::Config(_)
        ));
    }
}
