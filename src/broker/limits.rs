use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid limits file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Checks applied before a table is handed to the broker client.
///
/// Missing fields in a config file fall back to [`ConversionLimits::v0`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionLimits {
    /// AMQP field names are short strings: at most 255 bytes.
    pub max_key_bytes: usize,
    /// Depth of nested tables and arrays below the root table.
    pub max_nesting_depth: usize,
    /// When false, machine-width `Int` values are rejected and callers
    /// must pick an explicit width.
    pub allow_machine_int: bool,
}

impl ConversionLimits {
    pub fn v0() -> Self {
        Self {
            max_key_bytes: 255,
            max_nesting_depth: 32,
            allow_machine_int: true,
        }
    }

    /// Load limits from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        let limits = serde_json::from_reader(f)?;
        Ok(limits)
    }
}

impl Default for ConversionLimits {
    fn default() -> Self {
        Self::v0()
    }
}
