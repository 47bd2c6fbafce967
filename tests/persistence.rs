//! Persistence round-trip properties for the file backend.

use proptest::prelude::*;
use serde_json::{Map, Value};
use tempfile::TempDir;

use roster::{Collection, FileStorage, StorageBackend};

/// Arbitrary JSON values: leaves plus shallow arrays and objects. Floats are
/// left out so equality is exact.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 _-]{0,16}".prop_map(Value::String),
    ];

    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn record_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z_]{1,8}", value_strategy(), 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
}

fn collection_strategy() -> impl Strategy<Value = Collection> {
    prop::collection::btree_map(
        (1u32..10_000).prop_map(|n| n.to_string()),
        record_strategy(),
        0..8,
    )
}

proptest! {
    #[test]
    fn round_trip_preserves_collection(collection in collection_strategy()) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("students.json"));

        storage.save(&collection).unwrap();
        prop_assert_eq!(storage.load().unwrap(), collection);
    }

    #[test]
    fn save_is_a_full_overwrite(first in collection_strategy(), second in collection_strategy()) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("students.json"));

        storage.save(&first).unwrap();
        storage.save(&second).unwrap();

        // No residue from the first generation survives.
        prop_assert_eq!(storage.load().unwrap(), second);
    }
}
