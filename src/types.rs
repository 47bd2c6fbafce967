//! Core types for the student record service.

use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier for a student record: the decimal-string form of a positive
/// integer, as it appears in the persisted document.
pub type StudentId = String;

/// One student's data: an arbitrary JSON object with no enforced schema.
/// A `course` string field, when present, participates in filtering.
pub type Record = Value;

/// The full mapping of ID to record, the unit of persistence.
///
/// A BTreeMap keeps serialization order deterministic; the order itself
/// carries no meaning.
pub type Collection = BTreeMap<StudentId, Record>;

/// Field consulted by the list filter.
pub const COURSE_FIELD: &str = "course";

/// Returns true if the record's `course` field is a string equal to `course`.
///
/// A missing or non-string field never matches.
pub fn course_matches(record: &Record, course: &str) -> bool {
    record
        .get(COURSE_FIELD)
        .and_then(Value::as_str)
        .is_some_and(|c| c == course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_match() {
        assert!(course_matches(&json!({"course": "CS"}), "CS"));
        assert!(!course_matches(&json!({"course": "CS"}), "Math"));
    }

    #[test]
    fn test_missing_course_never_matches() {
        assert!(!course_matches(&json!({"name": "Alice"}), "CS"));
    }

    #[test]
    fn test_non_string_course_never_matches() {
        assert!(!course_matches(&json!({"course": 42}), "42"));
        assert!(!course_matches(&json!({"course": null}), "null"));
    }
}
