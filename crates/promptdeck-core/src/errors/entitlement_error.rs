//! Top-level error for entitlement service operations.
//!
//! Only auth-class and refresh failures are ever returned to callers from the
//! mutating operations. Quota exhaustion is a `false` from
//! `track_modification`, not an error.

use super::error_code::{self, ErrorCode};
use super::{AuthError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum EntitlementError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("operation requires a signed-in account")]
    NotSignedIn,

    #[error("subscription refresh failed: {reason}")]
    SubscriptionRefresh { reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for EntitlementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::NotSignedIn => error_code::NOT_SIGNED_IN,
            Self::SubscriptionRefresh { .. } => error_code::SUBSCRIPTION_REFRESH_FAILED,
            Self::Storage(e) => e.error_code(),
        }
    }
}

/// Convenience type alias.
pub type EntitlementResult<T> = Result<T, EntitlementError>;
