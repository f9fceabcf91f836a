//! Position Evaluator Domain Service

use rust_decimal::Decimal;

use crate::domain::position::value_objects::{
    AssessmentSource, HeuristicScore, OpenPosition, PositionAssessment, PositionRules,
    PositionState,
};
use crate::domain::sentiment::SentimentScore;

/// Derives HOLD/EXIT/CLOSE_TO_SL/TARGET_HIT for an open position.
#[derive(Debug, Clone, Default)]
pub struct PositionEvaluator {
    rules: PositionRules,
}

impl PositionEvaluator {
    /// Create an evaluator with the given rules.
    #[must_use]
    pub const fn new(rules: PositionRules) -> Self {
        Self { rules }
    }

    /// Evaluate at the position's current price.
    ///
    /// Rules are checked in priority order and the first match wins:
    /// stop hit, second target, first target, near stop, sentiment, range.
    #[must_use]
    pub fn evaluate(
        &self,
        position: &OpenPosition,
        sentiment: &SentimentScore,
    ) -> PositionAssessment {
        let plan = &position.plan;
        let price = position.current_price;
        let aligned = sentiment.favors(position.kind);

        let (state, source, reason) = if price <= plan.stop_loss {
            (
                PositionState::Exit,
                AssessmentSource::RiskManagement,
                format!(
                    "Stop loss hit at {}. Exit immediately to limit losses.",
                    plan.stop_loss.round()
                ),
            )
        } else if let Some(target2) = plan.target2.filter(|t2| price >= *t2) {
            (
                PositionState::Exit,
                AssessmentSource::ProfitBooking,
                format!(
                    "Target 2 achieved at {}. Book profits and exit.",
                    target2.round()
                ),
            )
        } else if price >= plan.target1 {
            (
                PositionState::TargetHit,
                AssessmentSource::ProfitBooking,
                format!(
                    "Target 1 achieved at {}. Consider booking partial profits or trailing SL.",
                    plan.target1.round()
                ),
            )
        } else if price <= plan.stop_loss * self.rules.close_to_stop_buffer {
            let within = ((self.rules.close_to_stop_buffer - Decimal::ONE)
                * Decimal::ONE_HUNDRED)
                .normalize();
            (
                PositionState::CloseToStopLoss,
                AssessmentSource::RiskAlert,
                format!(
                    "Price dangerously close to stop loss (within {within}%). Monitor closely or exit to avoid loss."
                ),
            )
        } else if aligned {
            (
                PositionState::Hold,
                AssessmentSource::MarketSentiment,
                format!(
                    "Market sentiment is {}, favoring your {} position. Hold for targets.",
                    sentiment.classification, position.kind
                ),
            )
        } else {
            (
                PositionState::Hold,
                AssessmentSource::Technical,
                "Trade within range. Monitor market conditions and adjust stop loss if needed."
                    .to_string(),
            )
        };

        let delta = position
            .entry_greeks
            .map_or(self.rules.synthetic_delta, |g| g.delta);
        let bonus = if aligned { self.rules.sentiment_bonus } else { 0.0 };
        let score = HeuristicScore::compute(
            delta,
            bonus,
            (price - plan.stop_loss).to_f64(),
            (plan.target1 - price).to_f64(),
        );

        tracing::debug!(
            %state,
            %price,
            conviction = score.conviction_rate,
            "Evaluated position"
        );

        PositionAssessment {
            state,
            reason,
            source,
            pnl: position.pnl(),
            pnl_percent: position.pnl_percent(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_plan::RiskPlan;
    use crate::domain::shared::Money;
    use crate::pricing::{Greeks, OptionKind};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn position(kind: OptionKind, price: Decimal) -> OpenPosition {
        let plan = RiskPlan::new(
            Money::new(dec!(150)),
            Money::new(dec!(120)),
            Money::new(dec!(180)),
            Some(Money::new(dec!(210))),
        )
        .unwrap();
        let mut pos = OpenPosition::new(kind, plan, 1, 75).unwrap();
        pos.update_price(Money::new(price));
        pos
    }

    #[test_case(dec!(119) => (PositionState::Exit, AssessmentSource::RiskManagement); "stop hit")]
    #[test_case(dec!(120) => (PositionState::Exit, AssessmentSource::RiskManagement); "at stop")]
    #[test_case(dec!(215) => (PositionState::Exit, AssessmentSource::ProfitBooking); "second target")]
    #[test_case(dec!(183) => (PositionState::TargetHit, AssessmentSource::ProfitBooking); "first target")]
    #[test_case(dec!(124) => (PositionState::CloseToStopLoss, AssessmentSource::RiskAlert); "near stop")]
    #[test_case(dec!(127) => (PositionState::Hold, AssessmentSource::Technical); "just outside buffer")]
    fn priority_order(price: Decimal) -> (PositionState, AssessmentSource) {
        let a = PositionEvaluator::default()
            .evaluate(&position(OptionKind::Call, price), &SentimentScore::neutral());
        (a.state, a.source)
    }

    #[test]
    fn stop_loss_reason_mentions_level() {
        let a = PositionEvaluator::default()
            .evaluate(&position(OptionKind::Call, dec!(119)), &SentimentScore::neutral());
        assert!(a.reason.contains("Stop loss hit at ₹120.00"));
        assert_eq!(a.pnl, Money::new(dec!(-2325)));
    }

    #[test]
    fn near_stop_reason_mentions_buffer() {
        let a = PositionEvaluator::default()
            .evaluate(&position(OptionKind::Call, dec!(124)), &SentimentScore::neutral());
        assert!(a.reason.contains("within 5%"));
        assert_eq!(a.score.conviction_rate, 79);
    }

    #[test]
    fn aligned_sentiment_holds_with_bonus() {
        let bullish = SentimentScore::new(30.0);
        let a = PositionEvaluator::default()
            .evaluate(&position(OptionKind::Call, dec!(150)), &bullish);
        assert_eq!(a.state, PositionState::Hold);
        assert_eq!(a.source, AssessmentSource::MarketSentiment);
        assert!(a.reason.contains("BULLISH"));
        assert_eq!(a.score.target_likelihood, 95);

        let put = PositionEvaluator::default().evaluate(&position(OptionKind::Put, dec!(150)), &bullish);
        assert_eq!(put.source, AssessmentSource::Technical);
        assert_eq!(put.score.target_likelihood, 80);
    }

    #[test]
    fn recorded_delta_replaces_proxy() {
        let pos = position(OptionKind::Call, dec!(150)).with_entry_greeks(Greeks {
            delta: 0.3,
            ..Greeks::default()
        });
        let a = PositionEvaluator::default().evaluate(&pos, &SentimentScore::neutral());
        assert_eq!(a.score.target_likelihood, 65);
    }
}
