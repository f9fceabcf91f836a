//! Tracing Setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! formatting layer writing to stderr (stdout carries the binary's JSON).
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives; overrides `observability.logging.level`
//! - `observability.logging.json`: JSON lines instead of human-readable output
//! - `observability.logging.ansi`: colour codes in human-readable output
//!
//! # Usage
//!
//! ```rust,ignore
//! use options_advisor::config::LoggingConfig;
//! use options_advisor::telemetry::init_telemetry;
//!
//! init_telemetry(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` when set, else the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TryInitError> {
    let registry = Registry::default().with(env_filter(config));

    if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(level = %config.level, json = config.json, "Telemetry initialized");
    Ok(())
}
