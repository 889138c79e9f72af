//! Account data model shared by the service, the stores and the UI layer.

pub mod account;
pub mod identity;
pub mod subscription;
pub mod tier;
pub mod usage;

pub use account::UserAccountState;
pub use identity::Identity;
pub use subscription::{SubscriptionData, SubscriptionRecord, SubscriptionStatus};
pub use tier::Tier;
pub use usage::DailyUsage;
