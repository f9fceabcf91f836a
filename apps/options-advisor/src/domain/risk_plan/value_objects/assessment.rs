//! Advisory output of plan validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Money;

/// A problem found in a user-supplied plan.
///
/// Warnings are advisory; a plan with warnings is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskWarning {
    /// Entry premium is zero or negative; nothing else can be measured.
    InvalidEntry {
        /// The entry supplied.
        entry: Money,
    },
    /// Stop loss sits too close to entry.
    StopLossTooTight {
        /// Distance from entry in percent.
        percent: Decimal,
    },
    /// Stop loss risks too much of the premium.
    StopLossTooWide {
        /// Distance from entry in percent.
        percent: Decimal,
    },
    /// First target barely clears entry.
    TargetTooClose {
        /// Distance from entry in percent.
        percent: Decimal,
    },
    /// First target is unrealistically far.
    TargetTooAmbitious {
        /// Distance from entry in percent.
        percent: Decimal,
    },
    /// Reward does not justify the risk.
    PoorRiskReward {
        /// Target percent over stop percent.
        ratio: Decimal,
    },
    /// Stop loss equals entry, so the ratio has no denominator.
    RiskRewardUndefined,
    /// Stop loss is at or above entry for a long option.
    StopLossNotBelowEntry,
    /// Target is at or below entry for a long option.
    TargetNotAboveEntry,
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEntry { entry } => {
                write!(f, "Entry price must be positive (got {entry}).")
            }
            Self::StopLossTooTight { percent } => write!(
                f,
                "Stop loss is very tight ({percent:.2}%). Consider widening to avoid premature exit."
            ),
            Self::StopLossTooWide { percent } => write!(
                f,
                "Stop loss is very wide ({percent:.2}%). Consider tightening to limit risk."
            ),
            Self::TargetTooClose { percent } => write!(
                f,
                "Target 1 is very close ({percent:.2}%). Consider setting a higher target for better risk-reward."
            ),
            Self::TargetTooAmbitious { percent } => write!(
                f,
                "Target 1 is very ambitious ({percent:.2}%). Consider a more realistic target."
            ),
            Self::PoorRiskReward { ratio } => write!(
                f,
                "Risk-reward ratio is {ratio:.2}:1. Aim for at least 2:1 for better trades."
            ),
            Self::RiskRewardUndefined => {
                f.write_str("Stop loss equals entry; risk-reward ratio is undefined.")
            }
            Self::StopLossNotBelowEntry => {
                f.write_str("Stop loss should be below the entry price for a long option.")
            }
            Self::TargetNotAboveEntry => {
                f.write_str("Target 1 should be above the entry price for a long option.")
            }
        }
    }
}

/// Replacement levels proposed alongside warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSuggestion {
    /// Suggested stop loss, 2 dp.
    pub stop_loss: Option<Money>,
    /// Suggested first target, 2 dp.
    pub target1: Option<Money>,
}

impl PlanSuggestion {
    /// True when nothing is suggested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stop_loss.is_none() && self.target1.is_none()
    }
}

/// Result of validating a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Warnings in evaluation order.
    pub warnings: Vec<RiskWarning>,
    /// Suggested replacements.
    pub suggestions: PlanSuggestion,
    /// Stop distance from entry in percent.
    pub stop_loss_percent: Option<Decimal>,
    /// Target distance from entry in percent.
    pub target_percent: Option<Decimal>,
    /// Target percent over stop percent; `None` when the stop equals entry.
    pub risk_reward: Option<Decimal>,
}

impl RiskAssessment {
    /// No warnings were raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning texts in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
