//! Position assessment output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Money;

const TARGET_FLOOR: f64 = 20.0;
const TARGET_CEILING: f64 = 95.0;
const STOP_FLOOR: f64 = 10.0;
const STOP_CEILING: f64 = 80.0;
const MAX_PROXIMITY_RATIO: f64 = 3.0;

/// Recommended action for an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionState {
    /// Keep the position.
    #[serde(rename = "HOLD")]
    Hold,
    /// Close the position.
    #[serde(rename = "EXIT")]
    Exit,
    /// Within the stop-loss buffer.
    #[serde(rename = "CLOSE_TO_SL")]
    CloseToStopLoss,
    /// First target reached.
    #[serde(rename = "TARGET_HIT")]
    TargetHit,
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hold => "HOLD",
            Self::Exit => "EXIT",
            Self::CloseToStopLoss => "CLOSE_TO_SL",
            Self::TargetHit => "TARGET_HIT",
        })
    }
}

/// Which rule family produced the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    /// Stop loss hit.
    RiskManagement,
    /// A target was reached.
    ProfitBooking,
    /// Price near the stop.
    RiskAlert,
    /// Sentiment favors the position.
    MarketSentiment,
    /// Nothing triggered.
    Technical,
}

impl fmt::Display for AssessmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RiskManagement => "Risk Management Rule",
            Self::ProfitBooking => "Profit Booking Strategy",
            Self::RiskAlert => "Risk Alert",
            Self::MarketSentiment => "Market Sentiment Analysis",
            Self::Technical => "Technical Analysis",
        })
    }
}

/// Linear conviction heuristic built from a delta proxy and sentiment.
///
/// These are UX scores in `0..=100`, not calibrated probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicScore {
    /// Score that the first target is reached.
    pub target_likelihood: u8,
    /// Score that the stop loss is hit.
    pub stop_loss_likelihood: u8,
    /// Blend of the two.
    pub conviction_rate: u8,
}

impl HeuristicScore {
    /// Score a position.
    ///
    /// * `delta` - entry delta or proxy; only its magnitude matters
    /// * `bonus` - added to the target score when sentiment favors the position
    /// * `distance_to_stop` - `price - stop_loss`
    /// * `distance_to_target` - `target1 - price`
    #[must_use]
    pub fn compute(delta: f64, bonus: f64, distance_to_stop: f64, distance_to_target: f64) -> Self {
        let delta = delta.abs();
        let ratio = if distance_to_target <= 0.0 {
            MAX_PROXIMITY_RATIO
        } else if distance_to_stop <= 0.0 {
            0.0
        } else {
            (distance_to_stop / distance_to_target).clamp(0.0, MAX_PROXIMITY_RATIO)
        };

        let target = (50.0 + 50.0 * delta + bonus).clamp(TARGET_FLOOR, TARGET_CEILING);
        let stop = (40.0 - 30.0 * delta - 10.0 * ratio).clamp(STOP_FLOOR, STOP_CEILING);
        let conviction = ((target + 100.0 - stop) / 2.0).round();

        Self {
            target_likelihood: target.round() as u8,
            stop_loss_likelihood: stop.round() as u8,
            conviction_rate: conviction as u8,
        }
    }
}

/// Full evaluation of one position at its current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssessment {
    /// Recommended action.
    pub state: PositionState,
    /// Explanation.
    pub reason: String,
    /// Rule family.
    pub source: AssessmentSource,
    /// Unrealised P&L.
    pub pnl: Money,
    /// Unrealised P&L in percent of entry.
    pub pnl_percent: Decimal,
    /// Conviction heuristic.
    pub score: HeuristicScore,
}
