//! Account-store errors.

use super::error_code::{self, ErrorCode};

/// Errors raised by an `AccountStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned: {context}")]
    LockPoisoned { context: String },

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            Self::Unavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
