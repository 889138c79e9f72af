//! Tracing subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_VAR;

static INITIALIZED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber. Safe to call more than once; only the first
/// call has an effect. Returns whether this call installed it.
///
/// `PROMPTDECK_LOG` takes precedence over `config.level`.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(config.effective_level()))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let result = if config.effective_json() {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .try_init()
        };
        // Fails if the host already installed a subscriber.
        installed = result.is_ok();
        true
    });
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_no_op() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
