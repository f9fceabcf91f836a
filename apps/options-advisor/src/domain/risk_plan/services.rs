//! Risk Validator Domain Service

use crate::domain::risk_plan::value_objects::{
    PlanSuggestion, RiskAssessment, RiskPlan, RiskRules, RiskWarning,
};
use crate::domain::shared::Money;
use rust_decimal::Decimal;

/// Auto-sizes and validates stop-loss/target plans.
#[derive(Debug, Clone, Default)]
pub struct RiskValidator {
    rules: RiskRules,
}

impl RiskValidator {
    /// Create a validator with the given rules.
    #[must_use]
    pub const fn new(rules: RiskRules) -> Self {
        Self { rules }
    }

    /// Active rules.
    #[must_use]
    pub const fn rules(&self) -> &RiskRules {
        &self.rules
    }

    /// Default plan for an entry premium.
    ///
    /// Levels are exact multiples of `entry`; round for display only.
    #[must_use]
    pub fn auto_size(&self, entry: Money) -> RiskPlan {
        RiskPlan {
            entry,
            stop_loss: entry * self.rules.auto_stop_loss,
            target1: entry * self.rules.auto_target1,
            target2: Some(entry * self.rules.auto_target2),
        }
    }

    /// Check a user plan and suggest replacements.
    ///
    /// Never fails. A non-positive entry yields a single
    /// [`RiskWarning::InvalidEntry`]; a stop equal to entry leaves
    /// `risk_reward` as `None` with [`RiskWarning::RiskRewardUndefined`].
    #[must_use]
    pub fn validate(&self, entry: Money, stop_loss: Money, target1: Money) -> RiskAssessment {
        if !entry.is_positive() {
            return RiskAssessment {
                warnings: vec![RiskWarning::InvalidEntry { entry }],
                ..RiskAssessment::default()
            };
        }

        // Distances beyond the Decimal range saturate.
        let sl_pct = stop_loss.percent_from(entry).unwrap_or(Decimal::MAX);
        let t1_pct = target1.percent_from(entry).unwrap_or(Decimal::MAX);

        let rules = &self.rules;
        let mut warnings = Vec::new();
        let mut suggestions = PlanSuggestion::default();

        if sl_pct < rules.min_stop_loss_percent {
            warnings.push(RiskWarning::StopLossTooTight { percent: sl_pct });
            suggestions.stop_loss = Some((entry * rules.tight_stop_suggestion).round());
        } else if sl_pct > rules.max_stop_loss_percent {
            warnings.push(RiskWarning::StopLossTooWide { percent: sl_pct });
            suggestions.stop_loss = Some((entry * rules.wide_stop_suggestion).round());
        }

        if t1_pct < rules.min_target_percent {
            warnings.push(RiskWarning::TargetTooClose { percent: t1_pct });
            suggestions.target1 = Some((entry * rules.close_target_suggestion).round());
        } else if t1_pct > rules.max_target_percent {
            warnings.push(RiskWarning::TargetTooAmbitious { percent: t1_pct });
            suggestions.target1 = Some((entry * rules.ambitious_target_suggestion).round());
        }

        // No ratio for a zero stop distance or one too small to divide by.
        let risk_reward = t1_pct.checked_div(sl_pct);
        match risk_reward {
            None => warnings.push(RiskWarning::RiskRewardUndefined),
            Some(ratio) if ratio < rules.min_risk_reward => {
                warnings.push(RiskWarning::PoorRiskReward {
                    ratio: ratio.round_dp(2),
                });
            }
            Some(_) => {}
        }

        if stop_loss >= entry {
            warnings.push(RiskWarning::StopLossNotBelowEntry);
        }
        if target1 <= entry {
            warnings.push(RiskWarning::TargetNotAboveEntry);
        }

        if !warnings.is_empty() {
            tracing::debug!(
                %entry,
                %stop_loss,
                %target1,
                warnings = warnings.len(),
                "Risk plan flagged"
            );
        }

        RiskAssessment {
            warnings,
            suggestions,
            stop_loss_percent: Some(sl_pct),
            target_percent: Some(t1_pct),
            risk_reward,
        }
    }

    /// Validate an existing plan's first target and stop.
    #[must_use]
    pub fn validate_plan(&self, plan: &RiskPlan) -> RiskAssessment {
        self.validate(plan.entry, plan.stop_loss, plan.target1)
    }
}
