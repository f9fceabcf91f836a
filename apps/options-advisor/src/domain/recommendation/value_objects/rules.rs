//! Recommendation thresholds.

use serde::{Deserialize, Serialize};

use super::classification::Confidence;

/// Greek and expiry thresholds for the recommendation engine.
///
/// Deltas are compared as magnitudes so the same numbers serve calls and puts.
/// Theta is per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRules {
    /// Strike grid spacing used to locate the ATM strike.
    pub strike_step: f64,
    /// ATM: minimum |delta| for a BUY.
    pub atm_min_delta: f64,
    /// Daily theta at or below which decay is too fast to buy.
    pub max_daily_decay: f64,
    /// ATM: theta above this earns HIGH confidence.
    pub high_confidence_theta: f64,
    /// OTM: strictly more days than this required.
    pub otm_min_days: u32,
    /// OTM: minimum |delta| for a BUY.
    pub otm_min_delta: f64,
    /// OTM: strictly more days than this earns MEDIUM rather than LOW.
    pub otm_medium_days: u32,
    /// ITM: minimum |delta| for a BUY.
    pub itm_min_delta: f64,
    /// Non-BUY candidates with fewer days than this and fast decay become SELL.
    pub sell_max_days: u32,
    /// Lowest tier included in the actionable list.
    pub min_actionable_confidence: Confidence,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            strike_step: 50.0,
            atm_min_delta: 0.5,
            max_daily_decay: -10.0,
            high_confidence_theta: -5.0,
            otm_min_days: 7,
            otm_min_delta: 0.3,
            otm_medium_days: 14,
            itm_min_delta: 0.7,
            sell_max_days: 7,
            min_actionable_confidence: Confidence::Low,
        }
    }
}

impl RecommendationRules {
    /// Same rules on a different strike grid.
    #[must_use]
    pub const fn with_strike_step(mut self, strike_step: f64) -> Self {
        self.strike_step = strike_step;
        self
    }
}
