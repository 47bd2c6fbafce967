//! ID allocation for student records.

use crate::error::{Result, StoreError};
use crate::types::{Collection, StudentId};

/// Compute the next free ID: one past the largest existing numeric ID,
/// or `"1"` for an empty collection.
///
/// Every key in a well-formed collection is the decimal form of an integer.
/// A key that does not parse means the backing file was edited by hand or
/// otherwise tampered with, and allocation refuses to guess: it returns
/// `StoreError::InvalidKey` rather than risk silently colliding with an
/// existing record.
pub fn next_id(collection: &Collection) -> Result<StudentId> {
    let mut max = 0u64;
    for key in collection.keys() {
        let n: u64 = key
            .parse()
            .map_err(|_| StoreError::InvalidKey(key.clone()))?;
        max = max.max(n);
    }
    Ok((max + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_collection_starts_at_one() {
        assert_eq!(next_id(&Collection::new()).unwrap(), "1");
    }

    #[test]
    fn test_next_after_max() {
        let mut collection = Collection::new();
        collection.insert("3".to_string(), json!({}));
        collection.insert("7".to_string(), json!({}));
        collection.insert("5".to_string(), json!({}));

        assert_eq!(next_id(&collection).unwrap(), "8");
    }

    #[test]
    fn test_gap_below_max_is_not_reused() {
        let mut collection = Collection::new();
        collection.insert("1".to_string(), json!({}));
        collection.insert("4".to_string(), json!({}));

        assert_eq!(next_id(&collection).unwrap(), "5");
    }

    #[test]
    fn test_non_numeric_key_is_an_error() {
        let mut collection = Collection::new();
        collection.insert("1".to_string(), json!({}));
        collection.insert("abc".to_string(), json!({}));

        let result = next_id(&collection);
        assert!(matches!(result, Err(StoreError::InvalidKey(k)) if k == "abc"));
    }

    #[test]
    fn test_negative_key_is_an_error() {
        let mut collection = Collection::new();
        collection.insert("-2".to_string(), json!({}));

        assert!(matches!(next_id(&collection), Err(StoreError::InvalidKey(_))));
    }
}
