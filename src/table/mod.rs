pub mod json;
pub mod table;
pub mod value;

pub use table::{Table, TableError};
pub use value::{Decimal, MetadataValue, ValueKind};
