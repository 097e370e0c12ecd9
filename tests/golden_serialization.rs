use chrono::{TimeZone, Utc};
use header_table::broker::ConversionError;
use header_table::table::{Decimal, MetadataValue, Table};
use serde_json::{json, Value};

#[test]
fn golden_table_serialization() {
    let mut t = Table::new();
    t.set("content-type", "application/json");
    t.insert("x-retry", 3i16);
    t.insert("x-sig", vec![0xdeu8, 0xad]);
    t.insert("x-price", Decimal::new(2, 1999));
    t.insert("x-sent", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());

    let json: Value = serde_json::to_value(&t).unwrap();
    assert_eq!(
        json,
        json!({
            "content-type": { "type": "string", "value": "application/json" },
            "x-retry": { "type": "int16", "value": 3 },
            "x-sig": { "type": "bytes", "value": "dead" },
            "x-price": { "type": "decimal", "value": { "scale": 2, "value": 1999 } },
            "x-sent": { "type": "timestamp", "value": "2024-01-02T03:04:05Z" },
        })
    );
}

#[test]
fn golden_keys_serialize_sorted() {
    let t: Table = [("zeta", "1"), ("alpha", "2"), ("mid", "3")].into_iter().collect();
    let json_str = serde_json::to_string(&t).unwrap();

    let alpha = json_str.find("\"alpha\"").unwrap();
    let mid = json_str.find("\"mid\"").unwrap();
    let zeta = json_str.find("\"zeta\"").unwrap();
    assert!(alpha < mid);
    assert!(mid < zeta);
}

#[test]
fn invariant_serde_round_trip_keeps_widths() {
    let mut nested = Table::new();
    nested.insert("null", MetadataValue::Null);

    let mut t = Table::new();
    t.insert("byte", 7u8);
    t.insert("int", 7isize);
    t.insert("i32", 7i32);
    t.insert("i64", 7i64);
    t.insert("f32", 0.5f32);
    t.insert("f64", 2.5f64);
    t.insert("nested", nested);
    t.insert(
        "mixed",
        vec![MetadataValue::Bool(true), MetadataValue::Bytes(vec![1, 2, 3])],
    );

    let json_str = serde_json::to_string(&t).unwrap();
    let back: Table = serde_json::from_str(&json_str).unwrap();
    assert_eq!(back, t);
}

#[test]
fn invariant_non_finite_floats_survive_serde() {
    let mut t = Table::new();
    t.insert("pos", f64::INFINITY);
    t.insert("neg", f64::NEG_INFINITY);
    t.insert("nan", f64::NAN);
    t.insert("f32_inf", f32::INFINITY);
    t.insert("f32_nan", f32::NAN);
    t.insert("finite", 1.5f64);

    let json: Value = serde_json::to_value(&t).unwrap();
    assert_eq!(json["pos"], json!({ "type": "float64", "value": "inf" }));
    assert_eq!(json["neg"], json!({ "type": "float64", "value": "-inf" }));
    assert_eq!(json["nan"], json!({ "type": "float64", "value": "NaN" }));
    assert_eq!(json["f32_inf"], json!({ "type": "float32", "value": "inf" }));
    assert_eq!(json["finite"], json!({ "type": "float64", "value": 1.5 }));

    let back: Table = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
    assert_eq!(back.value("pos"), Some(&MetadataValue::Float64(f64::INFINITY)));
    assert_eq!(back.value("neg"), Some(&MetadataValue::Float64(f64::NEG_INFINITY)));
    assert_eq!(back.value("f32_inf"), Some(&MetadataValue::Float32(f32::INFINITY)));
    assert_eq!(back.value("finite"), Some(&MetadataValue::Float64(1.5)));
    assert!(matches!(back.value("nan"), Some(MetadataValue::Float64(v)) if v.is_nan()));
    assert!(matches!(back.value("f32_nan"), Some(MetadataValue::Float32(v)) if v.is_nan()));
}

#[test]
fn invariant_unknown_float_text_fails_to_deserialize() {
    let raw = r#"{"k": {"type": "float64", "value": "infinity"}}"#;
    assert!(serde_json::from_str::<Table>(raw).is_err());
}

#[test]
fn invariant_unknown_value_type_fails_to_deserialize() {
    let raw = r#"{"k": {"type": "uint64", "value": 1}}"#;
    assert!(serde_json::from_str::<Table>(raw).is_err());
}

#[test]
fn from_json_infers_kinds() {
    let t = Table::from_json(json!({
        "small": 42,
        "large": 5_000_000_000i64,
        "ratio": 0.25,
        "name": "orders",
        "none": null,
        "ctx": { "tenant": "t1" },
        "list": [1, "a", false],
    }))
    .unwrap();

    assert_eq!(t.value("small"), Some(&MetadataValue::Int32(42)));
    assert_eq!(t.value("large"), Some(&MetadataValue::Int64(5_000_000_000)));
    assert_eq!(t.value("ratio"), Some(&MetadataValue::Float64(0.25)));
    assert_eq!(t.get("name").unwrap(), "orders");
    assert_eq!(t.value("none"), Some(&MetadataValue::Null));
    assert_eq!(
        t.value("ctx").and_then(MetadataValue::as_table).unwrap().get("tenant").unwrap(),
        "t1"
    );
    assert_eq!(
        t.value("list"),
        Some(&MetadataValue::Array(vec![
            MetadataValue::Int32(1),
            MetadataValue::String("a".into()),
            MetadataValue::Bool(false),
        ]))
    );
}

#[test]
fn from_json_rejects_unsupported_integer_naming_key() {
    let err = Table::from_json(json!({
        "ok": 1,
        "ctx": { "ids": [1, u64::MAX] },
    }))
    .unwrap_err();

    assert_eq!(
        err,
        ConversionError::UnsupportedType {
            key: "ctx.ids[1]".into(),
            kind: "u64",
        }
    );
    assert!(err.to_string().contains("ctx.ids[1]"));
}

#[test]
fn from_json_rejects_non_object_root() {
    let err = Table::from_json(json!([1, 2])).unwrap_err();
    assert_eq!(err, ConversionError::NotAnObject { found: "array" });
}
