use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use pramaan_types::Record;

use crate::error::{ServiceError, ServiceResult};

/// Field patterns for keyword extraction, tried per line in order.
struct FieldPatterns {
    roll_no: Regex,
    name: Vec<Regex>,
    certify_marker: Regex,
    course: Vec<Regex>,
    branch: Regex,
    grade: Regex,
    year: Regex,
}

fn patterns() -> &'static FieldPatterns {
    static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| FieldPatterns {
        roll_no: Regex::new(r"(?i)roll\s*(?:number|no\.?)\s*[:\-]?\s*([A-Za-z0-9/_\-]+)")
            .expect("static regex"),
        name: vec![
            Regex::new(r"(?i)certify\s+that\s+([A-Z][A-Za-z. ]+?)\s*$").expect("static regex"),
            Regex::new(r"(?i)^(?:holder\s+)?name\s*[:\-]\s*(.+)$").expect("static regex"),
        ],
        certify_marker: Regex::new(r"(?i)^(?:this\s+is\s+to\s+)?certify\s+that\s*$")
            .expect("static regex"),
        course: vec![
            Regex::new(r"(?i)completed\s+the\s+course\s+of\s+(.+?)(?:\s+with\b.*)?$")
                .expect("static regex"),
            Regex::new(r"(?i)^course\s*[:\-]\s*(.+)$").expect("static regex"),
        ],
        branch: Regex::new(r"(?i)^branch\s*[:\-]\s*(.+)$").expect("static regex"),
        grade: Regex::new(r"(?i)grade\s*[:\-]?\s*([A-FOS][+\-]?)\s*$").expect("static regex"),
        year: Regex::new(r"(?i)year\s*[:\-]?\s*((?:19|20)\d{2})\b").expect("static regex"),
    })
}

/// Pull the six record fields out of raw certificate text.
///
/// The text is whatever an external OCR engine read off a certificate, one
/// phrase per line. Extraction is a keyword scan: for each field the first
/// matching line wins, and extracted values are whitespace-trimmed (unlike
/// file ingestion, where values are opaque). All six fields must be found;
/// anything missing is reported as a validation error naming the fields.
pub fn extract_record(text: &str) -> ServiceResult<Record> {
    let p = patterns();
    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        capture_into(&mut fields, "RollNo", &p.roll_no, line);
        for regex in &p.name {
            capture_into(&mut fields, "Name", regex, line);
        }
        for regex in &p.course {
            capture_into(&mut fields, "Course", regex, line);
        }
        capture_into(&mut fields, "Branch", &p.branch, line);
        capture_into(&mut fields, "Grade", &p.grade, line);
        capture_into(&mut fields, "Year", &p.year, line);

        // "This is to certify that" on its own line names the holder on
        // the next non-empty line.
        if !fields.contains_key("Name") && p.certify_marker.is_match(line) {
            if let Some(next) = lines[index + 1..].iter().find(|l| !l.is_empty()) {
                fields.insert("Name".into(), next.to_string());
            }
        }
    }

    let missing: Vec<&str> = Record::FIELD_NAMES
        .iter()
        .copied()
        .filter(|name| !fields.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::Validation(format!(
            "could not extract fields: {}",
            missing.join(", ")
        )));
    }

    Record::from_fields(&fields).map_err(|e| ServiceError::Validation(e.to_string()))
}

fn capture_into(fields: &mut BTreeMap<String, String>, name: &str, regex: &Regex, line: &str) {
    if fields.contains_key(name) {
        return;
    }
    if let Some(captures) = regex.captures(line) {
        if let Some(value) = captures.get(1) {
            fields.insert(name.to_string(), value.as_str().trim().to_string());
        }
    }
}
