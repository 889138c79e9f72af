//! Account store configuration.

use serde::{Deserialize, Serialize};

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file. `None` keeps state in memory only.
    pub db_path: Option<String>,
    /// Reader connections for file-backed stores. Default: 2.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(2)
    }
}
