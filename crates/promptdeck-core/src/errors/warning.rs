//! Non-fatal conditions. Logged, never returned.

use std::fmt;

use super::error_code::{self, ErrorCode};
use crate::traits::StorageKey;

/// Conditions the service reports through `tracing` instead of `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitlementWarning {
    /// A store write failed after the in-memory mutation already happened.
    /// The in-memory state stays authoritative for this session.
    PersistenceWrite { key: StorageKey, reason: String },
    /// Another surface changed shared keys; the service reloads.
    StaleState { keys: Vec<StorageKey> },
}

impl EntitlementWarning {
    /// Emit through `tracing` with the stable code attached.
    pub fn emit(&self) {
        match self {
            Self::PersistenceWrite { .. } => {
                tracing::warn!(code = self.error_code(), "{}", self);
            }
            Self::StaleState { .. } => {
                tracing::debug!(code = self.error_code(), "{}", self);
            }
        }
    }
}

impl fmt::Display for EntitlementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersistenceWrite { key, reason } => {
                write!(f, "failed to persist '{}': {}", key.as_str(), reason)
            }
            Self::StaleState { keys } => {
                let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
                write!(f, "shared state changed externally: {}", names.join(", "))
            }
        }
    }
}

impl ErrorCode for EntitlementWarning {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PersistenceWrite { .. } => error_code::PERSISTENCE_WRITE_WARNING,
            Self::StaleState { .. } => error_code::STALE_STATE_WARNING,
        }
    }
}
