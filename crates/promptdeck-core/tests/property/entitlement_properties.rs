//! Property tests for the entitlement service: quota arithmetic, tier
//! transitions and the day rollover under arbitrary operation sequences.

use std::sync::Arc;

use proptest::prelude::*;

use promptdeck_core::config::EntitlementConfig;
use promptdeck_core::traits::MemoryAccountStore;
use promptdeck_core::{
    AccountStore, Clock, DailyUsage, EntitlementService, FeatureAccess, FixedClock, Identity, Quota,
    SubscriptionData, Tier,
};

#[derive(Debug, Clone)]
enum Op {
    SignIn,
    SignOut,
    Track,
    Upgrade,
    NextDay,
    Reload,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::SignIn),
        1 => Just(Op::SignOut),
        6 => Just(Op::Track),
        1 => Just(Op::Upgrade),
        1 => Just(Op::NextDay),
        1 => Just(Op::Reload),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_quota_and_state_invariants_hold(
        limit in 1u32..6,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let clock = Arc::new(FixedClock::on(2024, 1, 1));
            let config = EntitlementConfig {
                daily_modification_limit: Some(limit),
                ..EntitlementConfig::default()
            };
            let service = EntitlementService::new(
                Arc::new(MemoryAccountStore::new()) as Arc<dyn AccountStore>,
                clock.clone(),
                &config,
            );

            for op in ops {
                match op {
                    Op::SignIn => {
                        service.sign_in_with_identity(Identity::from_email("a@b.com")).await;
                    }
                    Op::SignOut => {
                        service.sign_out().await;
                        prop_assert_eq!(service.tier(), Tier::Anonymous);
                    }
                    Op::Track => {
                        let tier = service.tier();
                        let before = service.remaining_quota();
                        let allowed = service.track_modification().await;
                        match tier {
                            Tier::Anonymous => prop_assert!(!allowed),
                            Tier::Paid => prop_assert!(allowed),
                            Tier::Free => prop_assert_eq!(allowed, !before.is_exhausted()),
                        }
                    }
                    Op::Upgrade => {
                        let signed_in = service.get_state().is_signed_in;
                        let result = service.upgrade_to_paid(SubscriptionData::plan("pro")).await;
                        prop_assert_eq!(result.is_ok(), signed_in);
                    }
                    Op::NextDay => clock.advance_days(1),
                    Op::Reload => {
                        service.load().await;
                    }
                }

                let state = service.get_state();
                prop_assert_eq!(state.tier == Tier::Anonymous, !state.is_signed_in);
                prop_assert_eq!(state.identity.is_some(), state.is_signed_in);
                prop_assert_eq!(state.subscription.is_some(), state.tier == Tier::Paid);
                prop_assert_eq!(service.get_feature_access(), FeatureAccess::for_tier(state.tier));

                match service.remaining_quota() {
                    Quota::Unlimited => prop_assert_eq!(state.tier, Tier::Paid),
                    Quota::Remaining(remaining) => {
                        prop_assert!(state.tier != Tier::Paid);
                        let today = clock.today_string();
                        let used = state.usage().current_count(&today);
                        prop_assert!(used <= limit);
                        prop_assert_eq!(remaining + used, limit);
                    }
                }
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn prop_usage_increment_never_exceeds_calls(
        start in 0u32..10,
        same_day in any::<bool>(),
        calls in 0usize..10,
    ) {
        let stored_date = if same_day { "2024-01-01" } else { "2023-12-31" };
        let mut usage = DailyUsage { date: stored_date.to_string(), count: start };
        for _ in 0..calls {
            usage.increment("2024-01-01");
        }
        let base = if same_day { start } else { 0 };
        prop_assert_eq!(usage.current_count("2024-01-01"), base + calls as u32);
    }
}
