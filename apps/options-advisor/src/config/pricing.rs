//! Pricing model configuration.

use serde::{Deserialize, Serialize};

use crate::pricing::{DEFAULT_RISK_FREE_RATE, IvSolverConfig};

/// Pricing model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Risk-free rate (annualized, decimal).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Implied volatility solver settings.
    #[serde(default)]
    pub iv_solver: IvSolverConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            iv_solver: IvSolverConfig::default(),
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}
