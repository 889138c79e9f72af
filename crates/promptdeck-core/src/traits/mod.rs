//! Seams to the outside world: persistence, time, and the identity/payments
//! collaborators.

pub mod clock;
pub mod providers;
pub mod store;
pub mod test_helpers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use providers::{IdentityProvider, ProviderError, SubscriptionProvider};
pub use store::{AccountStore, StorageKey};
pub use test_helpers::MemoryAccountStore;
