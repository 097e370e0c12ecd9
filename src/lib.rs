//! Typed header tables for message-broker payloads.
//!
//! `header-table` provides a closed set of AMQP-compatible header value
//! kinds, string accessors, last-write-wins merging, and validated
//! conversion into the broker client's native field table. Conversion
//! fails locally, naming the offending key, instead of at publish time.

pub mod broker;
pub mod propagation;
pub mod table;
pub mod types;

pub use broker::{ConversionError, ConversionLimits, FieldTable, FieldValue};
pub use table::{Decimal, MetadataValue, Table, TableError};
