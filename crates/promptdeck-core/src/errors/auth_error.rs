//! Identity-provider failures.

use super::error_code::{self, ErrorCode};

/// Sign-in (or revoke) failed at the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in cancelled by the user")]
    Cancelled,

    #[error("identity provider failed: {reason}")]
    ProviderFailed { reason: String },
}

impl AuthError {
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::ProviderFailed {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::AUTH_CANCELLED,
            Self::ProviderFailed { .. } => error_code::AUTH_PROVIDER_FAILED,
        }
    }
}
