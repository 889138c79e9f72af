//! External collaborators: identity provider and payments provider.
//!
//! Both are remote and may fail; the service turns their failures into
//! distinguishable `EntitlementError` variants without touching state.

use crate::errors::AuthError;
use crate::types::{Identity, SubscriptionRecord};

/// Failure reported by a remote collaborator other than the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{provider}: {reason}")]
pub struct ProviderError {
    pub provider: String,
    pub reason: String,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Auth / identity platform.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider: Send + Sync {
    /// Interactive sign-in. `AuthError::Cancelled` when the user backs out.
    async fn sign_in(&self) -> Result<Identity, AuthError>;

    /// Revoke the remote session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Payments SDK.
#[allow(async_fn_in_trait)]
pub trait SubscriptionProvider: Send + Sync {
    /// Current subscription for `identity`, `None` if the user never subscribed.
    async fn subscription_status(
        &self,
        identity: &Identity,
    ) -> Result<Option<SubscriptionRecord>, ProviderError>;
}
