//! Tier resolution from identity and subscription.

use chrono::{DateTime, Utc};

use crate::types::{Identity, SubscriptionRecord, Tier};

/// Deterministic precedence:
/// 1. no identity → anonymous
/// 2. subscription active (and not past `expires_at`) → paid
/// 3. otherwise → free
///
/// Not cached: callers re-run it on every load and every change signal.
pub fn resolve_tier(
    identity: Option<&Identity>,
    subscription: Option<&SubscriptionRecord>,
    now: DateTime<Utc>,
) -> Tier {
    if identity.is_none() {
        return Tier::Anonymous;
    }
    match subscription {
        Some(record) if record.is_active_at(now) => Tier::Paid,
        _ => Tier::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubscriptionStatus;
    use chrono::Duration;

    fn record(status: SubscriptionStatus, expires_at: Option<DateTime<Utc>>) -> SubscriptionRecord {
        SubscriptionRecord {
            status,
            plan: "pro".into(),
            expires_at,
        }
    }

    #[test]
    fn test_no_identity_is_anonymous_even_with_subscription() {
        let sub = record(SubscriptionStatus::Active, None);
        assert_eq!(resolve_tier(None, Some(&sub), Utc::now()), Tier::Anonymous);
    }

    #[test]
    fn test_identity_without_subscription_is_free() {
        let id = Identity::from_email("a@b.com");
        assert_eq!(resolve_tier(Some(&id), None, Utc::now()), Tier::Free);
    }

    #[test]
    fn test_active_subscription_is_paid() {
        let id = Identity::from_email("a@b.com");
        let sub = record(SubscriptionStatus::Active, None);
        assert_eq!(resolve_tier(Some(&id), Some(&sub), Utc::now()), Tier::Paid);
    }

    #[test]
    fn test_cancelled_and_expired_are_free() {
        let id = Identity::from_email("a@b.com");
        for status in [SubscriptionStatus::Cancelled, SubscriptionStatus::Expired] {
            let sub = record(status, None);
            assert_eq!(resolve_tier(Some(&id), Some(&sub), Utc::now()), Tier::Free);
        }
    }

    #[test]
    fn test_active_past_expiry_is_free() {
        let now = Utc::now();
        let id = Identity::from_email("a@b.com");
        let sub = record(SubscriptionStatus::Active, Some(now - Duration::days(1)));
        assert_eq!(resolve_tier(Some(&id), Some(&sub), now), Tier::Free);

        let sub = record(SubscriptionStatus::Active, Some(now + Duration::days(1)));
        assert_eq!(resolve_tier(Some(&id), Some(&sub), now), Tier::Paid);
    }
}
