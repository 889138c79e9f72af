//! Entitlement configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DAILY_MODIFICATION_LIMIT, DEFAULT_UPGRADE_URL};

/// `[entitlements]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EntitlementConfig {
    /// Metered modifications per day for the free tier. Default: 3.
    pub daily_modification_limit: Option<u32>,
    /// Upgrade call-to-action target.
    pub upgrade_url: Option<String>,
}

impl EntitlementConfig {
    pub fn effective_daily_limit(&self) -> u32 {
        self.daily_modification_limit
            .unwrap_or(DEFAULT_DAILY_MODIFICATION_LIMIT)
    }

    pub fn effective_upgrade_url(&self) -> &str {
        self.upgrade_url.as_deref().unwrap_or(DEFAULT_UPGRADE_URL)
    }
}
