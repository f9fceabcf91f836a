//! Position monitoring thresholds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds for [`PositionEvaluator`](crate::domain::position::PositionEvaluator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionRules {
    /// Price at or below `stop_loss × buffer` is close to the stop.
    pub close_to_stop_buffer: Decimal,
    /// Delta proxy when the position recorded no entry Greeks.
    pub synthetic_delta: f64,
    /// Target likelihood bonus when sentiment favors the position.
    pub sentiment_bonus: f64,
}

impl Default for PositionRules {
    fn default() -> Self {
        Self {
            close_to_stop_buffer: dec!(1.05),
            synthetic_delta: 0.6,
            sentiment_bonus: 15.0,
        }
    }
}
