use std::collections::BTreeSet;

use header_table::table::{MetadataValue, Table, TableError, ValueKind};

fn sample() -> Table {
    let mut t = Table::new();
    t.set("content-type", "application/json");
    t.insert("x-retry", 3i32);
    t.insert("x-flag", true);
    t
}

#[test]
fn invariant_absent_key_reads_empty() {
    let t = sample();
    assert_eq!(t.get("missing").unwrap(), "");
    assert_eq!(Table::new().get("").unwrap(), "");
}

#[test]
fn invariant_absent_distinct_from_empty_in_typed_accessor() {
    let mut t = Table::new();
    t.set("empty", "");
    assert_eq!(t.try_get_string("empty").unwrap(), Some(""));
    assert_eq!(t.try_get_string("missing").unwrap(), None);
}

#[test]
fn invariant_set_then_get() {
    let mut t = sample();
    for (k, v) in [("a", "1"), ("content-type", "text/plain"), ("", "blank key"), ("b", "")] {
        t.set(k, v);
        assert_eq!(t.get(k).unwrap(), v);
    }
}

#[test]
fn invariant_set_overwrites_non_string() {
    let mut t = sample();
    t.set("x-retry", "three");
    assert_eq!(t.get("x-retry").unwrap(), "three");
}

#[test]
fn invariant_non_string_read_is_type_mismatch() {
    let t = sample();
    let err = t.get("x-retry").unwrap_err();
    assert_eq!(
        err,
        TableError::TypeMismatch {
            key: "x-retry".into(),
            expected: ValueKind::String,
            found: ValueKind::Int32,
        }
    );
    assert!(err.to_string().contains("x-retry"));
    assert!(t.try_get_string("x-flag").is_err());
}

#[test]
fn invariant_keys_match_entries() {
    let t = sample();
    let keys = t.keys();
    assert_eq!(keys.len(), t.len());

    let as_set: BTreeSet<String> = keys.into_iter().collect();
    let expected: BTreeSet<String> = ["content-type", "x-retry", "x-flag"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(as_set, expected);
}

#[test]
fn invariant_keys_is_snapshot() {
    let mut t = sample();
    let before = t.keys();
    t.set("new", "v");
    assert_eq!(before.len(), 3);
    assert_eq!(t.keys().len(), 4);
    assert!(Table::new().keys().is_empty());
}

#[test]
fn nested_values_are_stored_as_is() {
    let mut inner = Table::new();
    inner.set("region", "eu");

    let mut t = Table::new();
    t.insert("origin", inner.clone());
    t.insert(
        "hops",
        vec![MetadataValue::from("a"), MetadataValue::from(2i64), MetadataValue::Null],
    );

    assert_eq!(t.value("origin").and_then(|v| v.as_table()), Some(&inner));
    assert!(matches!(t.value("hops"), Some(MetadataValue::Array(items)) if items.len() == 3));
    assert!(t.remove("origin").is_some());
    assert!(!t.contains_key("origin"));
}
