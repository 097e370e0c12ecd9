use serde_json::Value;

use crate::broker::convert::{child_path, index_path, ConversionError};

use super::table::Table;
use super::value::MetadataValue;

impl Table {
    /// Build a table from untyped JSON.
    ///
    /// Integers become `Int32` when they fit and `Int64` otherwise; integers
    /// outside the `i64` range are rejected.
    pub fn from_json(value: Value) -> Result<Table, ConversionError> {
        match value {
            Value::Object(map) => object_to_table("", map),
            other => Err(ConversionError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

fn object_to_table(
    path: &str,
    map: serde_json::Map<String, Value>,
) -> Result<Table, ConversionError> {
    let mut table = Table::new();
    for (key, value) in map {
        let key_path = child_path(path, &key);
        let value = json_to_value(&key_path, value)?;
        table.insert(key, value);
    }
    Ok(table)
}

fn json_to_value(path: &str, value: Value) -> Result<MetadataValue, ConversionError> {
    let converted = match value {
        Value::Null => MetadataValue::Null,
        Value::Bool(b) => MetadataValue::Bool(b),
        Value::String(s) => MetadataValue::String(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(narrow) => MetadataValue::Int32(narrow),
                    Err(_) => MetadataValue::Int64(i),
                }
            } else if n.is_u64() {
                tracing::warn!(
                    target: "header_table::convert",
                    key = %path,
                    "Rejected unsigned integer outside i64 range"
                );
                return Err(ConversionError::UnsupportedType {
                    key: path.to_owned(),
                    kind: "u64",
                });
            } else {
                match n.as_f64() {
                    Some(f) => MetadataValue::Float64(f),
                    None => {
                        return Err(ConversionError::UnsupportedType {
                            key: path.to_owned(),
                            kind: "number",
                        })
                    }
                }
            }
        }
        Value::Array(items) => MetadataValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| json_to_value(&index_path(path, i), item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => MetadataValue::Table(object_to_table(path, map)?),
    };
    Ok(converted)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
