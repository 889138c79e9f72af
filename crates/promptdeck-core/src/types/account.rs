//! Process-lifetime account state held by the entitlement service.

use serde::{Deserialize, Serialize};

use super::{DailyUsage, Identity, SubscriptionRecord, Tier};

/// Snapshot of the account. Only `EntitlementService` constructs or mutates
/// one; callers get owned clones.
///
/// Invariants:
/// - `tier == Anonymous` iff `!is_signed_in` iff `identity.is_none()`
/// - `subscription.is_some()` iff `tier == Paid`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountState {
    pub is_signed_in: bool,
    pub tier: Tier,
    pub identity: Option<Identity>,
    pub daily_usage_count: u32,
    pub last_reset_date: String,
    pub subscription: Option<SubscriptionRecord>,
}

impl UserAccountState {
    /// Defaults at process start: anonymous, zero usage on `today`.
    pub fn anonymous(today: &str) -> Self {
        Self {
            is_signed_in: false,
            tier: Tier::Anonymous,
            identity: None,
            daily_usage_count: 0,
            last_reset_date: today.to_string(),
            subscription: None,
        }
    }

    pub fn usage(&self) -> DailyUsage {
        DailyUsage {
            date: self.last_reset_date.clone(),
            count: self.daily_usage_count,
        }
    }

    pub(crate) fn set_usage(&mut self, usage: DailyUsage) {
        self.last_reset_date = usage.date;
        self.daily_usage_count = usage.count;
    }
}
