//! Shared constants.

/// Metered modifications a free account may perform per calendar day.
pub const DEFAULT_DAILY_MODIFICATION_LIMIT: u32 = 3;

/// Where the upgrade call-to-action points when none is configured.
pub const DEFAULT_UPGRADE_URL: &str = "https://promptdeck.app/pricing";

/// Persisted date format for `dailyUsage.date`.
pub const USAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Config file looked up by `PromptdeckConfig::load`.
pub const CONFIG_FILE_NAME: &str = "promptdeck.toml";

/// Environment variable consulted by `init_tracing` before the configured level.
pub const LOG_ENV_VAR: &str = "PROMPTDECK_LOG";
