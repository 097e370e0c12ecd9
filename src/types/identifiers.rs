use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::table::Table;

/// Content hash of a header table, usable as an idempotency key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDigest(String);

impl TableDigest {
    /// Hash the table's JSON form. Keys serialize in sorted order, so equal
    /// tables hash equally however they were built.
    pub fn of(table: &Table) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_vec(table)?;

        let mut hasher = Sha256::new();
        hasher.update(&canonical);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        Ok(TableDigest(format!("sha256:{hex}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
