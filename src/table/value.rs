use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::table::Table;

/// Fixed-point decimal as carried in AMQP field tables: `value / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    pub scale: u8,
    pub value: i32,
}

impl Decimal {
    pub fn new(scale: u8, value: i32) -> Self {
        Self { scale, value }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}", self.value);
        }

        let sign = if self.value < 0 { "-" } else { "" };
        let digits = self.value.unsigned_abs().to_string();
        let digits = if digits.len() <= scale {
            format!("{digits:0>width$}", width = scale + 1)
        } else {
            digits
        };
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// A single header value. The variant set is closed: anything a broker
/// table can carry has a variant here, and nothing else can be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    Bool(bool),
    Byte(u8),
    #[serde(with = "float_text")]
    Float32(f32),
    #[serde(with = "float_text")]
    Float64(f64),
    /// Machine-width integer. Prefer an explicit width when the receiver
    /// cares about the encoded precision.
    Int(isize),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Null,
    String(String),
    Timestamp(DateTime<Utc>),
    Decimal(Decimal),
    Table(Table),
    #[serde(with = "hex_bytes")]
    Bytes(Vec<u8>),
    Array(Vec<MetadataValue>),
}

/// Name of a value's variant, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Byte,
    Float32,
    Float64,
    Int,
    Int16,
    Int32,
    Int64,
    Null,
    String,
    Timestamp,
    Decimal,
    Table,
    Bytes,
    Array,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Byte => "byte",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::Int => "int",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Decimal => "decimal",
            ValueKind::Table => "table",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MetadataValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            MetadataValue::Bool(_) => ValueKind::Bool,
            MetadataValue::Byte(_) => ValueKind::Byte,
            MetadataValue::Float32(_) => ValueKind::Float32,
            MetadataValue::Float64(_) => ValueKind::Float64,
            MetadataValue::Int(_) => ValueKind::Int,
            MetadataValue::Int16(_) => ValueKind::Int16,
            MetadataValue::Int32(_) => ValueKind::Int32,
            MetadataValue::Int64(_) => ValueKind::Int64,
            MetadataValue::Null => ValueKind::Null,
            MetadataValue::String(_) => ValueKind::String,
            MetadataValue::Timestamp(_) => ValueKind::Timestamp,
            MetadataValue::Decimal(_) => ValueKind::Decimal,
            MetadataValue::Table(_) => ValueKind::Table,
            MetadataValue::Bytes(_) => ValueKind::Bytes,
            MetadataValue::Array(_) => ValueKind::Array,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            MetadataValue::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MetadataValue {
                fn from(v: $ty) -> Self {
                    MetadataValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    f32 => Float32,
    f64 => Float64,
    isize => Int,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    String => String,
    DateTime<Utc> => Timestamp,
    Decimal => Decimal,
    Table => Table,
    Vec<u8> => Bytes,
    Vec<MetadataValue> => Array,
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::String(v.to_owned())
    }
}

impl From<&[u8]> for MetadataValue {
    fn from(v: &[u8]) -> Self {
        MetadataValue::Bytes(v.to_vec())
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(MetadataValue::Null, Into::into)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

// JSON has no NaN or infinities; those travel as "NaN", "inf" and "-inf".
mod float_text {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde::Serializer;

    pub trait Float: Copy {
        const NAN: Self;
        const INFINITY: Self;
        const NEG_INFINITY: Self;
        fn is_finite(self) -> bool;
        fn is_nan(self) -> bool;
        fn is_sign_positive(self) -> bool;
        fn serialize_finite<S: Serializer>(self, serializer: S) -> Result<S::Ok, S::Error>;
    }

    macro_rules! impl_float {
        ($ty:ident, $ser:ident) => {
            impl Float for $ty {
                const NAN: Self = $ty::NAN;
                const INFINITY: Self = $ty::INFINITY;
                const NEG_INFINITY: Self = $ty::NEG_INFINITY;

                fn is_finite(self) -> bool {
                    $ty::is_finite(self)
                }

                fn is_nan(self) -> bool {
                    $ty::is_nan(self)
                }

                fn is_sign_positive(self) -> bool {
                    $ty::is_sign_positive(self)
                }

                fn serialize_finite<S: Serializer>(self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.$ser(self)
                }
            }
        };
    }

    impl_float!(f32, serialize_f32);
    impl_float!(f64, serialize_f64);

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Number(T),
        Text(String),
    }

    pub fn serialize<T: Float, S: Serializer>(v: &T, serializer: S) -> Result<S::Ok, S::Error> {
        let v = *v;
        if v.is_finite() {
            v.serialize_finite(serializer)
        } else if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Float + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        match Repr::<T>::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "NaN" => Ok(T::NAN),
                "inf" => Ok(T::INFINITY),
                "-inf" => Ok(T::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid float {other:?}"))),
            },
        }
    }
}
