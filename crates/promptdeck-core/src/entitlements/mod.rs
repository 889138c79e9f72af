//! Tiered entitlements and usage accounting.
//!
//! ## Tiers
//! - **anonymous**: browse and copy prompts
//! - **free**: + save, modify, create prompts and sequences, metered daily
//! - **paid**: everything, unmetered
//!
//! ## Components
//! - **features**: capability flags per tier (the access table)
//! - **resolver**: identity + subscription → tier
//! - **usage**: per-day counter of metered modifications
//! - **persisted**: typed reads/writes of the three store keys
//! - **service**: `EntitlementService`, the facade the UI talks to

pub mod features;
pub mod persisted;
pub mod quota;
pub mod resolver;
pub mod service;
pub mod usage;

pub use features::{features_for_tier, tier_allows, Capability, FeatureAccess};
pub use quota::Quota;
pub use resolver::resolve_tier;
pub use service::EntitlementService;
pub use usage::UsageCounter;
