// In-memory shape of the broker client's header table.
// Wire encoding belongs to the client, not here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::table::{Decimal, MetadataValue, Table};

/// A header value in the broker client's native representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    ShortShortUInt(u8),
    Float(f32),
    Double(f64),
    /// Machine-width integer left for the client to encode. AMQP itself has
    /// no such kind; RabbitMQ clients typically pick a signed 32 or 64 bit
    /// field. Disable with `ConversionLimits::allow_machine_int`.
    NativeInt(isize),
    ShortInt(i16),
    LongInt(i32),
    LongLongInt(i64),
    Void,
    LongString(String),
    Timestamp(DateTime<Utc>),
    DecimalValue(Decimal),
    FieldTable(FieldTable),
    ByteArray(Vec<u8>),
    FieldArray(Vec<FieldValue>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTable {
    entries: BTreeMap<String, FieldValue>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: FieldValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries.iter()
    }
}

impl From<&FieldValue> for MetadataValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Boolean(b) => MetadataValue::Bool(*b),
            FieldValue::ShortShortUInt(b) => MetadataValue::Byte(*b),
            FieldValue::Float(f) => MetadataValue::Float32(*f),
            FieldValue::Double(f) => MetadataValue::Float64(*f),
            FieldValue::NativeInt(i) => MetadataValue::Int(*i),
            FieldValue::ShortInt(i) => MetadataValue::Int16(*i),
            FieldValue::LongInt(i) => MetadataValue::Int32(*i),
            FieldValue::LongLongInt(i) => MetadataValue::Int64(*i),
            FieldValue::Void => MetadataValue::Null,
            FieldValue::LongString(s) => MetadataValue::String(s.clone()),
            FieldValue::Timestamp(ts) => MetadataValue::Timestamp(*ts),
            FieldValue::DecimalValue(d) => MetadataValue::Decimal(*d),
            FieldValue::FieldTable(t) => MetadataValue::Table(Table::from(t)),
            FieldValue::ByteArray(b) => MetadataValue::Bytes(b.clone()),
            FieldValue::FieldArray(items) => {
                MetadataValue::Array(items.iter().map(MetadataValue::from).collect())
            }
        }
    }
}

impl From<&FieldTable> for Table {
    fn from(table: &FieldTable) -> Self {
        table
            .iter()
            .map(|(k, v)| (k.clone(), MetadataValue::from(v)))
            .collect()
    }
}
