//! Logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::GeneralConfig;
use crate::error::{AffinityError, Result};

/// Build the log filter: `RUST_LOG` when set, otherwise the configured level.
#[must_use]
pub fn env_filter(config: &GeneralConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global `tracing` subscriber.
///
/// # Errors
/// Returns `AffinityError::Config` if a global subscriber is already set.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AffinityError::Config(format!("tracing subscriber: {e}")))
}
