use thiserror::Error;

use crate::table::Table;

use super::convert::{to_field_table, ConversionError};
use super::field::FieldTable;
use super::limits::ConversionLimits;

#[derive(Debug, Error)]
pub enum PublishError<E: std::error::Error + 'static> {
    #[error("Header conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    #[error("Publish failed: {0}")]
    Broker(#[source] E),
}

/// The broker client's publish operation, seen from this crate.
pub trait Publisher {
    type Error: std::error::Error + 'static;

    fn publish(
        &self,
        routing_key: &str,
        payload: &[u8],
        headers: FieldTable,
    ) -> Result<(), Self::Error>;
}

/// Convert `headers` and publish. A table that fails conversion never
/// reaches the publisher.
pub fn publish_with_headers<P: Publisher>(
    publisher: &P,
    routing_key: &str,
    payload: &[u8],
    headers: &Table,
    limits: &ConversionLimits,
) -> Result<(), PublishError<P::Error>> {
    let field_table = to_field_table(headers, limits)?;
    publisher
        .publish(routing_key, payload, field_table)
        .map_err(PublishError::Broker)
}
