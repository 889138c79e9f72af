//! Subscription record reported by the payments collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Persisted under the `subscription` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub status: SubscriptionStatus,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionRecord {
    /// Active and not past its expiry at `now`. A record without `expires_at`
    /// never lapses on its own.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active
            && self.expires_at.map_or(true, |expires| expires > now)
    }
}

/// Input to `upgrade_to_paid`. Everything but the plan is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionData {
    pub plan: String,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionData {
    pub fn plan(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            ..Self::default()
        }
    }

    /// Normalized form stored on upgrade: missing status means `Active`,
    /// the plan name is trimmed.
    pub fn normalize(&self) -> SubscriptionRecord {
        SubscriptionRecord {
            status: self.status.unwrap_or_default(),
            plan: self.plan.trim().to_string(),
            expires_at: self.expires_at,
        }
    }
}
