pub mod convert;
pub mod field;
pub mod limits;
pub mod publish;

pub use convert::{to_field_table, ConversionError};
pub use field::{FieldTable, FieldValue};
pub use limits::{ConfigError, ConversionLimits};
pub use publish::{publish_with_headers, PublishError, Publisher};
