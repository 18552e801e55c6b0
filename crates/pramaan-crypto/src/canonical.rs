use std::collections::BTreeMap;

use pramaan_types::Record;

/// Errors from canonical serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonicalError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Serialize a record into its unique canonical byte form.
///
/// Field names are sorted by byte order and emitted as a compact JSON object
/// with no whitespace, so two records with identical field→value mappings
/// produce identical bytes no matter the order their fields were supplied
/// in. This is the single serialization routine shared by ingestion and
/// verification.
pub fn canonical_bytes(record: &Record) -> Result<Vec<u8>, CanonicalError> {
    let sorted: BTreeMap<&str, &str> = record.fields().into_iter().collect();
    serde_json::to_vec(&sorted).map_err(|e| CanonicalError::Serialization(e.to_string()))
}
