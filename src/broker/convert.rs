use thiserror::Error;

use crate::table::{MetadataValue, Table};

use super::field::{FieldTable, FieldValue};
use super::limits::ConversionLimits;

/// Errors raised before a table reaches the broker client. `key` is the
/// dotted path to the offending entry, with `[i]` for array positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Unsupported type {kind} for key {key}")]
    UnsupportedType { key: String, kind: &'static str },
    #[error("Key {key} is {len} bytes, limit is {max}")]
    KeyTooLong { key: String, len: usize, max: usize },
    #[error("Value at key {key} nests deeper than {max} levels")]
    NestingTooDeep { key: String, max: usize },
    #[error("Machine-width int for key {key}; use int16, int32 or int64")]
    MachineIntDisallowed { key: String },
    #[error("Header table root must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

impl ConversionError {
    pub fn key(&self) -> Option<&str> {
        match self {
            ConversionError::UnsupportedType { key, .. }
            | ConversionError::KeyTooLong { key, .. }
            | ConversionError::NestingTooDeep { key, .. }
            | ConversionError::MachineIntDisallowed { key } => Some(key),
            ConversionError::NotAnObject { .. } => None,
        }
    }
}

impl Table {
    /// Convert to the broker client's table with default limits.
    pub fn to_field_table(&self) -> Result<FieldTable, ConversionError> {
        to_field_table(self, &ConversionLimits::default())
    }
}

/// Copy every entry of `table` into a [`FieldTable`], validating keys,
/// nesting and integer widths first. Nothing is returned on failure.
pub fn to_field_table(
    table: &Table,
    limits: &ConversionLimits,
) -> Result<FieldTable, ConversionError> {
    tracing::debug!(
        target: "header_table::convert",
        entries = table.len(),
        "Converting header table"
    );

    let converted = convert_table("", table, 0, limits).map_err(|e| {
        tracing::warn!(
            target: "header_table::convert",
            key = e.key().unwrap_or(""),
            error = %e,
            "Rejected header table"
        );
        e
    })?;

    Ok(converted)
}

fn convert_table(
    path: &str,
    table: &Table,
    depth: usize,
    limits: &ConversionLimits,
) -> Result<FieldTable, ConversionError> {
    let mut out = FieldTable::new();
    for (key, value) in table {
        let key_path = child_path(path, key);
        if key.len() > limits.max_key_bytes {
            return Err(ConversionError::KeyTooLong {
                key: key_path,
                len: key.len(),
                max: limits.max_key_bytes,
            });
        }
        let field = convert_value(&key_path, value, depth, limits)?;
        out.insert(key.clone(), field);
    }
    Ok(out)
}

fn convert_value(
    path: &str,
    value: &MetadataValue,
    depth: usize,
    limits: &ConversionLimits,
) -> Result<FieldValue, ConversionError> {
    let field = match value {
        MetadataValue::Bool(b) => FieldValue::Boolean(*b),
        MetadataValue::Byte(b) => FieldValue::ShortShortUInt(*b),
        MetadataValue::Float32(f) => FieldValue::Float(*f),
        MetadataValue::Float64(f) => FieldValue::Double(*f),
        MetadataValue::Int(i) => {
            if !limits.allow_machine_int {
                return Err(ConversionError::MachineIntDisallowed {
                    key: path.to_owned(),
                });
            }
            FieldValue::NativeInt(*i)
        }
        MetadataValue::Int16(i) => FieldValue::ShortInt(*i),
        MetadataValue::Int32(i) => FieldValue::LongInt(*i),
        MetadataValue::Int64(i) => FieldValue::LongLongInt(*i),
        MetadataValue::Null => FieldValue::Void,
        MetadataValue::String(s) => FieldValue::LongString(s.clone()),
        MetadataValue::Timestamp(ts) => FieldValue::Timestamp(*ts),
        MetadataValue::Decimal(d) => FieldValue::DecimalValue(*d),
        MetadataValue::Bytes(b) => FieldValue::ByteArray(b.clone()),
        MetadataValue::Table(nested) => {
            check_depth(path, depth, limits)?;
            FieldValue::FieldTable(convert_table(path, nested, depth + 1, limits)?)
        }
        MetadataValue::Array(items) => {
            check_depth(path, depth, limits)?;
            let fields = items
                .iter()
                .enumerate()
                .map(|(i, item)| convert_value(&index_path(path, i), item, depth + 1, limits))
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::FieldArray(fields)
        }
    };
    Ok(field)
}

fn check_depth(path: &str, depth: usize, limits: &ConversionLimits) -> Result<(), ConversionError> {
    if depth + 1 > limits.max_nesting_depth {
        return Err(ConversionError::NestingTooDeep {
            key: path.to_owned(),
            max: limits.max_nesting_depth,
        });
    }
    Ok(())
}

pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
