//! EntitlementService: the single authority for "may the user do X right now".
//!
//! Combines the capability table with the daily quota and owns the account
//! transitions. Subscribers are notified after every mutation.
//!
//! Reads (`get_state`, `can_access`, `remaining_quota`, ...) are synchronous.
//! Mutations are async and serialized through a per-instance operation gate,
//! so a `track_modification` racing a `sign_out` cannot interleave their store
//! writes. Store write failures never block the in-memory change; they are
//! logged as persistence warnings and reconciled on the next load.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::config::EntitlementConfig;
use crate::errors::error_code::ErrorCode;
use crate::errors::{EntitlementError, EntitlementResult, EntitlementWarning, StorageError};
use crate::events::{AccountEvent, EventDispatcher, Subscription};
use crate::traits::{
    AccountStore, Clock, IdentityProvider, StorageKey, SubscriptionProvider, SystemClock,
};
use crate::types::{
    DailyUsage, Identity, SubscriptionData, SubscriptionRecord, Tier, UserAccountState,
};

use super::features::{Capability, FeatureAccess};
use super::persisted;
use super::quota::Quota;
use super::resolver::resolve_tier;
use super::usage::UsageCounter;

/// Explicitly constructed, owned by the application's composition root and
/// shared by reference (`Arc<EntitlementService>`). No global instance.
pub struct EntitlementService {
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
    usage: UsageCounter,
    upgrade_url: String,
    state: RwLock<UserAccountState>,
    dispatcher: EventDispatcher,
    op_gate: AsyncMutex<()>,
}

impl EntitlementService {
    /// Fresh anonymous state for today. Call `load()` to rehydrate.
    pub fn new(
        store: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
        config: &EntitlementConfig,
    ) -> Self {
        let today = clock.today_string();
        Self {
            usage: UsageCounter::new(Arc::clone(&store), config.effective_daily_limit()),
            store,
            clock,
            upgrade_url: config.effective_upgrade_url().to_string(),
            state: RwLock::new(UserAccountState::anonymous(&today)),
            dispatcher: EventDispatcher::new(),
            op_gate: AsyncMutex::new(()),
        }
    }

    /// System clock and default limits.
    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        Self::new(store, Arc::new(SystemClock), &EntitlementConfig::default())
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Owned snapshot; never aliases internal state.
    pub fn get_state(&self) -> UserAccountState {
        self.read_state().clone()
    }

    pub fn tier(&self) -> Tier {
        self.read_state().tier
    }

    pub fn get_feature_access(&self) -> FeatureAccess {
        FeatureAccess::for_tier(self.tier())
    }

    pub fn can_access(&self, capability: Capability) -> bool {
        self.get_feature_access().get(capability)
    }

    /// `Unlimited` for paid accounts, otherwise what is left of today's limit.
    pub fn remaining_quota(&self) -> Quota {
        let state = self.read_state();
        if state.tier == Tier::Paid {
            return Quota::Unlimited;
        }
        let today = self.clock.today_string();
        Quota::Remaining(self.usage.remaining(&state.usage(), &today))
    }

    /// Free account with today's quota used up.
    pub fn needs_upgrade(&self) -> bool {
        self.tier() == Tier::Free && self.remaining_quota().is_exhausted()
    }

    pub fn daily_limit(&self) -> u32 {
        self.usage.limit()
    }

    pub fn upgrade_url(&self) -> &str {
        &self.upgrade_url
    }

    /// Upgrade call-to-action for the UI once the quota is exhausted.
    pub fn upgrade_message(&self) -> Option<String> {
        if !self.needs_upgrade() {
            return None;
        }
        Some(format!(
            "You've used all {} AI modifications for today. Upgrade for unlimited use at {}",
            self.usage.limit(),
            self.upgrade_url
        ))
    }

    /// Register a listener for state changes. See `EventDispatcher::subscribe`.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AccountEvent, &UserAccountState) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(callback)
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Rehydrate from the store. Unreadable records fall back to defaults.
    pub async fn load(&self) -> Tier {
        let _gate = self.op_gate.lock().await;
        self.reload_locked()
    }

    /// Consume one metered modification.
    ///
    /// Call once per completed action, after `can_access(ModifyPrompts)`
    /// already passed. Returns `false` when today's quota is used up (the
    /// caller shows the upgrade prompt) or when nobody is signed in.
    pub async fn track_modification(&self) -> bool {
        let _gate = self.op_gate.lock().await;
        let today = self.clock.today_string();

        let (usage, event, snapshot) = {
            let mut state = self.write_state();
            match state.tier {
                Tier::Paid => return true,
                Tier::Anonymous => {
                    debug!("Modification tracked without a signed-in account, denied");
                    return false;
                }
                Tier::Free => {}
            }

            let mut usage = state.usage();
            if self.usage.is_exhausted(&usage, &today) {
                info!(
                    limit = self.usage.limit(),
                    date = %today,
                    "Daily modification quota exhausted"
                );
                return false;
            }

            let count = self.usage.increment(&mut usage, &today);
            state.set_usage(usage.clone());
            let event = AccountEvent::UsageTracked {
                count,
                remaining: self.usage.limit().saturating_sub(count),
            };
            (usage, event, state.clone())
        };

        self.persist(StorageKey::DailyUsage, self.usage.persist(&usage));
        self.dispatcher.emit(&event, &snapshot);
        true
    }

    /// Interactive sign-in through the identity provider.
    ///
    /// Provider failure or cancellation returns `EntitlementError::Auth` and
    /// leaves state untouched.
    pub async fn sign_in<P: IdentityProvider>(&self, provider: &P) -> EntitlementResult<Identity> {
        let _gate = self.op_gate.lock().await;
        let identity = match provider.sign_in().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "Sign-in failed");
                return Err(EntitlementError::Auth(e));
            }
        };
        self.apply_sign_in(identity.clone());
        Ok(identity)
    }

    /// Sign in with an identity the caller already obtained.
    pub async fn sign_in_with_identity(&self, identity: Identity) {
        let _gate = self.op_gate.lock().await;
        self.apply_sign_in(identity);
    }

    /// Local sign-out. Always succeeds; store failures are only logged.
    pub async fn sign_out(&self) {
        let _gate = self.op_gate.lock().await;
        self.apply_sign_out();
    }

    /// Sign out locally, then revoke the remote session. A failed revoke is
    /// logged and otherwise ignored: the user never stays "signed in" because
    /// the network was down.
    pub async fn sign_out_with<P: IdentityProvider>(&self, provider: &P) {
        let _gate = self.op_gate.lock().await;
        self.apply_sign_out();
        if let Err(e) = provider.sign_out().await {
            warn!(code = e.error_code(), error = %e, "Remote sign-out failed; local session already cleared");
        }
    }

    /// Reflect a completed payment. No payment processing happens here.
    ///
    /// Requires a signed-in account. Returns the normalized record that was
    /// stored. A record that is not active on arrival is stored but the tier
    /// stays free.
    pub async fn upgrade_to_paid(
        &self,
        data: SubscriptionData,
    ) -> EntitlementResult<SubscriptionRecord> {
        let _gate = self.op_gate.lock().await;
        let record = data.normalize();
        let now = self.clock.now();

        let (event, snapshot) = {
            let mut state = self.write_state();
            if !state.is_signed_in {
                return Err(EntitlementError::NotSignedIn);
            }
            let tier = resolve_tier(state.identity.as_ref(), Some(&record), now);
            state.tier = tier;
            state.subscription = (tier == Tier::Paid).then(|| record.clone());

            let event = if tier == Tier::Paid {
                AccountEvent::TierUpgraded {
                    plan: record.plan.clone(),
                }
            } else {
                AccountEvent::SubscriptionChanged { tier }
            };
            (event, state.clone())
        };

        self.persist(
            StorageKey::Subscription,
            persisted::write_subscription(self.store.as_ref(), &record),
        );
        info!(plan = %record.plan, tier = %snapshot.tier, "Subscription applied");
        self.dispatcher.emit(&event, &snapshot);
        Ok(record)
    }

    /// Re-query the payments collaborator and re-derive the tier.
    ///
    /// Network failure returns `SubscriptionRefresh` and changes nothing.
    pub async fn refresh_subscription<P: SubscriptionProvider>(
        &self,
        provider: &P,
    ) -> EntitlementResult<Tier> {
        let _gate = self.op_gate.lock().await;
        let identity = self
            .read_state()
            .identity
            .clone()
            .ok_or(EntitlementError::NotSignedIn)?;

        let fetched = provider
            .subscription_status(&identity)
            .await
            .map_err(|e| {
                warn!(error = %e, "Subscription refresh failed");
                EntitlementError::SubscriptionRefresh {
                    reason: e.to_string(),
                }
            })?;

        let now = self.clock.now();
        let tier = resolve_tier(Some(&identity), fetched.as_ref(), now);
        let active = fetched.filter(|_| tier == Tier::Paid);

        let (changed, snapshot) = {
            let mut state = self.write_state();
            let changed = state.tier != tier || state.subscription != active;
            state.tier = tier;
            state.subscription = active.clone();
            (changed, state.clone())
        };

        let write = match &active {
            Some(record) => persisted::write_subscription(self.store.as_ref(), record),
            None => self.store.remove(StorageKey::Subscription),
        };
        self.persist(StorageKey::Subscription, write);

        if changed {
            info!(tier = %tier, "Subscription status changed");
            self.dispatcher
                .emit(&AccountEvent::SubscriptionChanged { tier }, &snapshot);
        }
        Ok(tier)
    }

    /// Another surface wrote shared keys. Reloads unless `keys` is empty;
    /// returns whether a reload happened.
    pub async fn handle_storage_change(&self, keys: &[StorageKey]) -> bool {
        let mut changed = keys.to_vec();
        if changed.is_empty() {
            return false;
        }
        changed.sort();
        changed.dedup();
        EntitlementWarning::StaleState { keys: changed }.emit();

        let _gate = self.op_gate.lock().await;
        self.reload_locked();
        true
    }

    // ── Internals (callers hold the op gate) ───────────────────

    fn reload_locked(&self) -> Tier {
        let today = self.clock.today_string();
        let now = self.clock.now();

        let identity = persisted::read_identity(self.store.as_ref()).unwrap_or_else(|e| {
            warn!(error = %e, "Unreadable identity record, treating as signed out");
            None
        });
        let subscription =
            persisted::read_subscription(self.store.as_ref()).unwrap_or_else(|e| {
                warn!(error = %e, "Unreadable subscription record, ignoring");
                None
            });
        let usage = self.usage.load(&today);

        let tier = resolve_tier(identity.as_ref(), subscription.as_ref(), now);
        if subscription.is_some() && tier == Tier::Free {
            info!("Stored subscription is no longer active, account is on the free tier");
        }

        let snapshot = {
            let mut state = self.write_state();
            *state = build_state(tier, identity, subscription, usage);
            state.clone()
        };
        debug!(tier = %tier, "Account state loaded");
        self.dispatcher
            .emit(&AccountEvent::Loaded { tier }, &snapshot);
        tier
    }

    fn apply_sign_in(&self, identity: Identity) {
        let today = self.clock.today_string();
        let now = self.clock.now();

        self.persist(
            StorageKey::User,
            persisted::write_identity(self.store.as_ref(), &identity),
        );

        // Same-day re-login keeps what was already consumed. An unreadable
        // record fails open in memory but is never overwritten.
        let usage = match self.usage.load_existing() {
            Ok(Some(existing)) => existing,
            Ok(None) => {
                let fresh = DailyUsage::fresh(&today);
                self.persist(StorageKey::DailyUsage, self.usage.persist(&fresh));
                fresh
            }
            Err(e) => {
                warn!(error = %e, "Unreadable daily usage record at sign-in, leaving it in place");
                DailyUsage::fresh(&today)
            }
        };

        let subscription =
            persisted::read_subscription(self.store.as_ref()).unwrap_or_else(|e| {
                warn!(error = %e, "Unreadable subscription record at sign-in, ignoring");
                None
            });
        let tier = resolve_tier(Some(&identity), subscription.as_ref(), now);
        let email = identity.email.clone();

        let snapshot = {
            let mut state = self.write_state();
            *state = build_state(tier, Some(identity), subscription, usage);
            state.clone()
        };
        info!(tier = %tier, "Signed in");
        self.dispatcher
            .emit(&AccountEvent::SignedIn { email, tier }, &snapshot);
    }

    fn apply_sign_out(&self) {
        let (previous_tier, snapshot) = {
            let mut state = self.write_state();
            let previous = state.tier;
            state.is_signed_in = false;
            state.tier = Tier::Anonymous;
            state.identity = None;
            state.subscription = None;
            (previous, state.clone())
        };

        self.persist(StorageKey::User, self.store.remove(StorageKey::User));
        self.persist(
            StorageKey::Subscription,
            self.store.remove(StorageKey::Subscription),
        );
        info!(previous_tier = %previous_tier, "Signed out");
        self.dispatcher
            .emit(&AccountEvent::SignedOut { previous_tier }, &snapshot);
    }

    fn persist(&self, key: StorageKey, result: Result<(), StorageError>) {
        if let Err(e) = result {
            EntitlementWarning::PersistenceWrite {
                key,
                reason: e.to_string(),
            }
            .emit();
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, UserAccountState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, UserAccountState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Assemble a state that satisfies the invariants for a resolved tier:
/// identity only when signed in, subscription only when paid.
fn build_state(
    tier: Tier,
    identity: Option<Identity>,
    subscription: Option<SubscriptionRecord>,
    usage: DailyUsage,
) -> UserAccountState {
    let signed_in = tier.is_signed_in();
    UserAccountState {
        is_signed_in: signed_in,
        tier,
        identity: identity.filter(|_| signed_in),
        daily_usage_count: usage.count,
        last_reset_date: usage.date,
        subscription: subscription.filter(|_| tier == Tier::Paid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FixedClock, MemoryAccountStore};

    fn service() -> (EntitlementService, Arc<MemoryAccountStore>) {
        let store = Arc::new(MemoryAccountStore::new());
        let svc = EntitlementService::new(
            store.clone() as Arc<dyn AccountStore>,
            Arc::new(FixedClock::on(2024, 1, 1)),
            &EntitlementConfig::default(),
        );
        (svc, store)
    }

    #[test]
    fn test_initial_state_is_anonymous_today() {
        let (svc, _) = service();
        let state = svc.get_state();
        assert_eq!(state.tier, Tier::Anonymous);
        assert!(!state.is_signed_in);
        assert_eq!(state.last_reset_date, "2024-01-01");
        assert_eq!(svc.remaining_quota(), Quota::Remaining(3));
    }

    #[test]
    fn test_build_state_drops_subscription_below_paid() {
        let record = SubscriptionData::plan("pro").normalize();
        let state = build_state(
            Tier::Free,
            Some(Identity::from_email("a@b.com")),
            Some(record),
            DailyUsage::fresh("2024-01-01"),
        );
        assert!(state.subscription.is_none());
        assert!(state.is_signed_in);
    }

    #[tokio::test]
    async fn test_anonymous_track_modification_is_denied() {
        let (svc, store) = service();
        assert!(!svc.track_modification().await);
        assert!(store.peek(StorageKey::DailyUsage).is_none());
    }

    #[tokio::test]
    async fn test_upgrade_requires_sign_in() {
        let (svc, _) = service();
        let err = svc
            .upgrade_to_paid(SubscriptionData::plan("pro"))
            .await
            .unwrap_err();
        assert!(matches!(err, EntitlementError::NotSignedIn));
        assert_eq!(svc.tier(), Tier::Anonymous);
    }

    #[tokio::test]
    async fn test_upgrade_message_only_when_exhausted() {
        let (svc, _) = service();
        svc.sign_in_with_identity(Identity::from_email("a@b.com"))
            .await;
        assert!(svc.upgrade_message().is_none());
        for _ in 0..3 {
            svc.track_modification().await;
        }
        let msg = svc.upgrade_message().unwrap();
        assert!(msg.contains("3 AI modifications"));
        assert!(msg.contains("promptdeck.app/pricing"));
    }
}
