use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One certificate's attributes.
///
/// The field set is fixed and shared by issuance and verification: a record
/// that reaches either path has exactly these six fields. Values are opaque
/// strings: no trimming, casing, or numeric coercion is applied, so the
/// same logical value always hashes identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub roll_no: String,
    pub name: String,
    pub course: String,
    pub branch: String,
    pub grade: String,
    pub year: String,
}

impl Record {
    /// The external field names, as they appear in record files and
    /// canonical serialization.
    pub const FIELD_NAMES: [&'static str; 6] =
        ["RollNo", "Name", "Course", "Branch", "Grade", "Year"];

    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        course: impl Into<String>,
        branch: impl Into<String>,
        grade: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            course: course.into(),
            branch: branch.into(),
            grade: grade.into(),
            year: year.into(),
        }
    }

    /// Build a record from a name→value mapping, validating the field set.
    ///
    /// The mapping must contain exactly [`Record::FIELD_NAMES`]; a missing
    /// or unknown name is a [`TypeError`].
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, TypeError> {
        for name in fields.keys() {
            if !Self::FIELD_NAMES.contains(&name.as_str()) {
                return Err(TypeError::UnknownField(name.clone()));
            }
        }
        let get = |name: &'static str| -> Result<String, TypeError> {
            fields
                .get(name)
                .cloned()
                .ok_or(TypeError::MissingField(name))
        };
        Ok(Self {
            roll_no: get("RollNo")?,
            name: get("Name")?,
            course: get("Course")?,
            branch: get("Branch")?,
            grade: get("Grade")?,
            year: get("Year")?,
        })
    }

    /// The record as (name, value) pairs in declaration order.
    ///
    /// Canonical ordering is applied by the canonicalizer, not here.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("RollNo", self.roll_no.as_str()),
            ("Name", self.name.as_str()),
            ("Course", self.course.as_str()),
            ("Branch", self.branch.as_str()),
            ("Grade", self.grade.as_str()),
            ("Year", self.year.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("RollNo".into(), "1".into());
        map.insert("Name".into(), "Alice".into());
        map.insert("Course".into(), "CS".into());
        map.insert("Branch".into(), "AI".into());
        map.insert("Grade".into(), "A".into());
        map.insert("Year".into(), "2024".into());
        map
    }

    #[test]
    fn from_fields_builds_record() {
        let record = Record::from_fields(&sample_fields()).unwrap();
        assert_eq!(record, Record::new("1", "Alice", "CS", "AI", "A", "2024"));
    }

    #[test]
    fn from_fields_rejects_missing() {
        let mut fields = sample_fields();
        fields.remove("Grade");
        let err = Record::from_fields(&fields).unwrap_err();
        assert_eq!(err, TypeError::MissingField("Grade"));
    }

    #[test]
    fn from_fields_rejects_unknown() {
        let mut fields = sample_fields();
        fields.insert("Gpa".into(), "4.0".into());
        let err = Record::from_fields(&fields).unwrap_err();
        assert_eq!(err, TypeError::UnknownField("Gpa".into()));
    }

    #[test]
    fn fields_covers_every_name() {
        let record = Record::new("1", "Alice", "CS", "AI", "A", "2024");
        let names: Vec<&str> = record.fields().iter().map(|(n, _)| *n).collect();
        for name in Record::FIELD_NAMES {
            assert!(names.contains(&name));
        }
    }

    #[test]
    fn values_are_opaque() {
        // Whitespace and casing are preserved, not normalized.
        let record = Record::new(" 1 ", "alice", "CS", "AI", "A", "2024");
        assert_eq!(record.roll_no, " 1 ");
        assert_eq!(record.name, "alice");
    }
}
