//! `AccountStore`: key-value persistence shared by every extension surface.
//!
//! The core only reads on load and writes on mutate. Values are JSON documents
//! in the camelCase shapes of the persisted keys.

use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

/// The three shared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageKey {
    User,
    DailyUsage,
    Subscription,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [Self::User, Self::DailyUsage, Self::Subscription];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::DailyUsage => "dailyUsage",
            Self::Subscription => "subscription",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "dailyUsage" => Some(Self::DailyUsage),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }
}

/// Abstraction over the persisted key-value store.
///
/// Implemented by `promptdeck_storage::SqliteAccountStore` and, for tests,
/// by `MemoryAccountStore`.
pub trait AccountStore: Send + Sync {
    /// Read a key. `Ok(None)` when absent.
    fn get(&self, key: StorageKey) -> Result<Option<serde_json::Value>, StorageError>;

    /// Replace a key's value in a single write.
    fn set(&self, key: StorageKey, value: serde_json::Value) -> Result<(), StorageError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}
