//! Configuration module for the options advisor.
//!
//! YAML configuration with environment variable interpolation and a
//! validation pass. Every section is optional and falls back to the
//! exchange defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use options_advisor::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("risk-free rate: {}", config.pricing.risk_free_rate);
//! ```

mod cache;
mod exchange;
mod instruments;
mod observability;
mod pricing;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::position::PositionRules;
use crate::domain::recommendation::RecommendationRules;
use crate::domain::risk_plan::RiskRules;
use crate::pricing::ExchangeCalendar;

pub use cache::CacheConfig;
pub use exchange::ExchangeConfig;
pub use instruments::{InstrumentSpec, InstrumentsConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use pricing::PricingConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rate and IV solver settings.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Settlement convention.
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Lot sizes and strike steps per underlying.
    #[serde(default)]
    pub instruments: InstrumentsConfig,
    /// Recommendation thresholds.
    #[serde(default)]
    pub recommendation: RecommendationRules,
    /// Risk plan validation thresholds and auto-size multipliers.
    #[serde(default)]
    pub risk: RiskRules,
    /// Position monitoring settings.
    #[serde(default)]
    pub positions: PositionRules,
    /// Quote cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Log output.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Settlement calendar; validated configs always have one.
    #[must_use]
    pub fn calendar(&self) -> ExchangeCalendar {
        self.exchange.calendar().unwrap_or_default()
    }
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Parse, interpolate and validate configuration held in memory.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become the empty string.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match std::env::var(&caps[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] naming the first bad setting.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let pricing = &config.pricing;
    if !pricing.risk_free_rate.is_finite() {
        return Err(invalid("pricing.risk_free_rate must be a finite number"));
    }

    let iv = &pricing.iv_solver;
    if iv.max_iterations == 0 {
        return Err(invalid("pricing.iv_solver.max_iterations must be positive"));
    }
    if !(iv.tolerance > 0.0) {
        return Err(invalid("pricing.iv_solver.tolerance must be positive"));
    }
    if !(iv.min_vol > 0.0 && iv.min_vol < iv.max_vol) {
        return Err(invalid(
            "pricing.iv_solver bounds must satisfy 0 < min_vol < max_vol",
        ));
    }
    if !(iv.min_vol..=iv.max_vol).contains(&iv.initial_guess) {
        return Err(invalid(
            "pricing.iv_solver.initial_guess must lie within the volatility bounds",
        ));
    }

    if config.exchange.calendar().is_none() {
        return Err(invalid(
            "exchange offset or settlement time is out of range",
        ));
    }

    for (symbol, spec) in config.instruments.iter() {
        if spec.lot_size == 0 {
            return Err(invalid(format!("instruments.{symbol}.lot_size must be positive")));
        }
        if !(spec.strike_step > 0.0) {
            return Err(invalid(format!(
                "instruments.{symbol}.strike_step must be positive"
            )));
        }
    }

    let rec = &config.recommendation;
    if !(rec.strike_step > 0.0) {
        return Err(invalid("recommendation.strike_step must be positive"));
    }
    if rec.max_daily_decay > 0.0 || rec.high_confidence_theta > 0.0 {
        return Err(invalid(
            "recommendation theta thresholds are daily decay and must not be positive",
        ));
    }

    let risk = &config.risk;
    if !(risk.auto_stop_loss > Decimal::ZERO && risk.auto_stop_loss < Decimal::ONE) {
        return Err(invalid("risk.auto_stop_loss must be between 0 and 1"));
    }
    if risk.auto_target1 <= Decimal::ONE || risk.auto_target2 < risk.auto_target1 {
        return Err(invalid(
            "risk auto targets must satisfy 1 < auto_target1 <= auto_target2",
        ));
    }
    if risk.min_stop_loss_percent >= risk.max_stop_loss_percent {
        return Err(invalid(
            "risk.min_stop_loss_percent must be below max_stop_loss_percent",
        ));
    }
    if risk.min_target_percent >= risk.max_target_percent {
        return Err(invalid(
            "risk.min_target_percent must be below max_target_percent",
        ));
    }

    let positions = &config.positions;
    if !(0.0..=1.0).contains(&positions.synthetic_delta) {
        return Err(invalid("positions.synthetic_delta must be between 0.0 and 1.0"));
    }
    if positions.close_to_stop_buffer < Decimal::ONE {
        return Err(invalid("positions.close_to_stop_buffer must be at least 1"));
    }

    if config.observability.logging.level.trim().is_empty() {
        return Err(invalid("observability.logging.level must not be empty"));
    }

    Ok(())
}
