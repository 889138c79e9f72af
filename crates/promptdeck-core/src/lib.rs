//! # promptdeck-core
//!
//! Foundation crate for promptdeck.
//! Defines account types, errors, config, events, tracing setup, the account
//! store trait, and the tiered entitlement service that every surface of the
//! extension (popup, side panel, background) consults before enabling an action.

pub mod config;
pub mod constants;
pub mod entitlements;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::PromptdeckConfig;
pub use entitlements::{Capability, EntitlementService, FeatureAccess, Quota};
pub use errors::error_code::ErrorCode;
pub use errors::{AuthError, EntitlementError, EntitlementResult, StorageError};
pub use events::{AccountEvent, EventDispatcher, Subscription};
pub use traits::{AccountStore, Clock, FixedClock, StorageKey, SystemClock};
pub use types::{
    DailyUsage, Identity, SubscriptionData, SubscriptionRecord, SubscriptionStatus, Tier,
    UserAccountState,
};
