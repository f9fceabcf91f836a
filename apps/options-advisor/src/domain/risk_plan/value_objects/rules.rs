//! Risk validation thresholds and auto-size multipliers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds for [`RiskValidator`](crate::domain::risk_plan::RiskValidator).
///
/// Percentages are distances from entry in percent; multipliers apply to the
/// entry premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRules {
    /// Auto-size stop loss (35% max loss).
    pub auto_stop_loss: Decimal,
    /// Auto-size first target (65% gain).
    pub auto_target1: Decimal,
    /// Auto-size second target (125% gain).
    pub auto_target2: Decimal,
    /// Stop closer than this is too tight.
    pub min_stop_loss_percent: Decimal,
    /// Stop further than this is too wide.
    pub max_stop_loss_percent: Decimal,
    /// Target closer than this is too close.
    pub min_target_percent: Decimal,
    /// Target further than this is too ambitious.
    pub max_target_percent: Decimal,
    /// Minimum acceptable target%/stop% ratio.
    pub min_risk_reward: Decimal,
    /// Suggested stop for a too-tight plan (4% stop).
    pub tight_stop_suggestion: Decimal,
    /// Suggested stop for a too-wide plan (15% stop).
    pub wide_stop_suggestion: Decimal,
    /// Suggested target for a too-close plan (10% target).
    pub close_target_suggestion: Decimal,
    /// Suggested target for a too-ambitious plan (25% target).
    pub ambitious_target_suggestion: Decimal,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            auto_stop_loss: dec!(0.65),
            auto_target1: dec!(1.65),
            auto_target2: dec!(2.25),
            min_stop_loss_percent: dec!(1),
            max_stop_loss_percent: dec!(30),
            min_target_percent: dec!(3),
            max_target_percent: dec!(100),
            min_risk_reward: dec!(1.5),
            tight_stop_suggestion: dec!(0.96),
            wide_stop_suggestion: dec!(0.85),
            close_target_suggestion: dec!(1.10),
            ambitious_target_suggestion: dec!(1.25),
        }
    }
}
