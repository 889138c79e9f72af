//! Account mutation events.

use crate::types::Tier;

/// What changed. Listeners receive the event together with the resulting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    /// State rehydrated from the store (startup or external change).
    Loaded { tier: Tier },
    SignedIn { email: String, tier: Tier },
    SignedOut { previous_tier: Tier },
    /// One metered modification consumed.
    UsageTracked { count: u32, remaining: u32 },
    TierUpgraded { plan: String },
    /// Subscription refreshed from the payments provider.
    SubscriptionChanged { tier: Tier },
}

impl AccountEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loaded { .. } => "loaded",
            Self::SignedIn { .. } => "signed_in",
            Self::SignedOut { .. } => "signed_out",
            Self::UsageTracked { .. } => "usage_tracked",
            Self::TierUpgraded { .. } => "tier_upgraded",
            Self::SubscriptionChanged { .. } => "subscription_changed",
        }
    }
}
