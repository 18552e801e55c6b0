use std::collections::BTreeMap;
use std::path::Path;

use pramaan_types::Record;

use crate::error::{ServiceError, ServiceResult};

/// Parse a delimiter-separated record file into records.
///
/// The header row names the fields; every data row must carry the same
/// field set. The delimiter is taken from the header: tab when present,
/// comma otherwise. Field values are opaque; nothing is trimmed or
/// normalized beyond line-ending removal.
pub fn parse_records(input: &str) -> ServiceResult<Vec<Record>> {
    let mut lines = input.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));

    let header_line = lines
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ServiceError::validation("record file has no header row"))?;
    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };

    let header: Vec<&str> = header_line.split(delimiter).map(str::trim).collect();
    validate_header(&header)?;

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(delimiter).collect();
        if values.len() != header.len() {
            return Err(ServiceError::Validation(format!(
                "row {} has {} fields, header has {}",
                line_no + 2,
                values.len(),
                header.len()
            )));
        }
        let fields: BTreeMap<String, String> = header
            .iter()
            .zip(&values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let record = Record::from_fields(&fields)
            .map_err(|e| ServiceError::Validation(format!("row {}: {e}", line_no + 2)))?;
        records.push(record);
    }
    Ok(records)
}

/// Read and parse a record file from disk.
pub fn read_records_file(path: &Path) -> ServiceResult<Vec<Record>> {
    let text = std::fs::read_to_string(path)?;
    parse_records(&text)
}

fn validate_header(header: &[&str]) -> ServiceResult<()> {
    let mut seen = Vec::with_capacity(header.len());
    for name in header {
        if seen.contains(name) {
            return Err(ServiceError::Validation(format!(
                "duplicate header field: {name}"
            )));
        }
        if !Record::FIELD_NAMES.contains(name) {
            return Err(ServiceError::Validation(format!(
                "unknown header field: {name}"
            )));
        }
        seen.push(name);
    }
    for name in Record::FIELD_NAMES {
        if !seen.contains(&name) {
            return Err(ServiceError::Validation(format!(
                "missing header field: {name}"
            )));
        }
    }
    Ok(())
}
