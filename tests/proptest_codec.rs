//! Property-based tests for codec and store roundtrip correctness.
//!
//! These tests verify that decode(encode(x)) == x for random inputs, and
//! that the same holds once values have been through SQLite.

mod common;

use proptest::prelude::*;
use common::memory_conn;
use tinykv::kv::{decode, encode};
use tinykv::{KvStore, Value};

/// Largest magnitude an integer can have and still survive the f64 read path.
const EXACT_INT: i64 = 1 << 53;

fn json_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        prop::num::f64::NORMAL.prop_map(serde_json::Value::from),
        "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::from),
    ]
}

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    json_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<String>().prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        (-EXACT_INT..=EXACT_INT).prop_map(Value::from),
        prop::num::f64::NORMAL.prop_map(Value::from),
        json_value().prop_map(Value::Structured),
    ]
}

proptest! {
    #[test]
    fn roundtrip_structured_float(f in prop::num::f64::NORMAL) {
        let v = Value::from(serde_json::json!({"x": f}));
        let (tag, payload) = encode(&v);
        prop_assert_eq!(decode(tag, payload).unwrap(), v);
    }

    #[test]
    fn roundtrip_codec(v in value()) {
        let (tag, payload) = encode(&v);
        prop_assert_eq!(tag, v.tag());
        prop_assert_eq!(decode(tag, payload).unwrap(), v);
    }

    #[test]
    fn roundtrip_store(v in value()) {
        let conn = memory_conn();
        let store = KvStore::new(&conn).unwrap();
        store.set("k", v.clone()).unwrap();
        prop_assert_eq!(store.get("k").unwrap(), v);
    }

    #[test]
    fn overwrite_keeps_last(first in value(), second in value()) {
        let conn = memory_conn();
        let store = KvStore::new(&conn).unwrap();
        store.set("k", first).unwrap();
        store.set("K", second.clone()).unwrap();
        prop_assert_eq!(store.get("k").unwrap(), second);
    }

    #[test]
    fn get_many_returns_present_subset(
        present in prop::collection::btree_set("[a-z]{1,8}", 0..8),
        absent in prop::collection::btree_set("[0-9]{1,8}", 0..8),
    ) {
        let conn = memory_conn();
        let store = KvStore::new(&conn).unwrap();
        store.set_many(present.iter().map(|k| (k.as_str(), k.len() as i64))).unwrap();

        let found = store.get_many(present.iter().chain(absent.iter())).unwrap();
        prop_assert_eq!(found.len(), present.len());
        for k in &present {
            prop_assert_eq!(found.get(k), Some(&Value::from(k.len() as i64)));
        }
    }
}
