pub mod catalog_config;
pub mod entitlement_config;
pub mod logging_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

pub use catalog_config::CatalogConfig;
pub use entitlement_config::EntitlementConfig;
pub use logging_config::LoggingConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptdeckConfig {
    pub entitlements: EntitlementConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

impl PromptdeckConfig {
    /// Parse config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `promptdeck.toml` from `root`. A missing file yields defaults;
    /// an unreadable or invalid one is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.entitlements.daily_modification_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "entitlements.daily_modification_limit",
                message: "must be at least 1; upgrade the tier to remove the limit".to_string(),
            });
        }
        if let Some(level) = &self.logging.level {
            if level.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "logging.level",
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
