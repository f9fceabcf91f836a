//! Recommendation Engine Domain Service

use rayon::prelude::*;

use crate::domain::recommendation::value_objects::{
    ActionableTrade, Classification, Confidence, Recommendation, RecommendationRules, StrikeBand,
    TradeCandidate,
};
use crate::domain::sentiment::SentimentScore;
use crate::pricing::OptionKind;

/// Stateless classifier over [`RecommendationRules`].
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    rules: RecommendationRules,
}

impl RecommendationEngine {
    /// Create an engine with the given rules.
    #[must_use]
    pub const fn new(rules: RecommendationRules) -> Self {
        Self { rules }
    }

    /// Active rules.
    #[must_use]
    pub const fn rules(&self) -> &RecommendationRules {
        &self.rules
    }

    /// Classify a single candidate.
    #[must_use]
    pub fn classify(
        &self,
        candidate: &TradeCandidate,
        sentiment: &SentimentScore,
    ) -> Classification {
        let band = candidate.band(self.rules.strike_step);
        let delta = candidate.greeks.delta.abs();
        let theta = candidate.greeks.theta;
        let days = candidate.days_to_expiry;

        let base = self.base_confidence(band, delta, theta, days);
        let blocked_put = candidate.kind == OptionKind::Put && !candidate.in_breakdown();

        let classification = match base {
            Some(confidence) if !blocked_put => {
                let adjusted = adjust_for_sentiment(confidence, candidate.kind, sentiment);
                Classification {
                    recommendation: Recommendation::Buy,
                    confidence: Some(adjusted),
                    band,
                    rationale: format!(
                        "{band} {} {}: delta {delta:.3}, theta {theta:.2}/day, {days} days to expiry, sentiment {}",
                        candidate.strike, candidate.kind, sentiment.classification
                    ),
                }
            }
            _ if days < self.rules.sell_max_days && theta <= self.rules.max_daily_decay => {
                Classification {
                    recommendation: Recommendation::Sell,
                    confidence: None,
                    band,
                    rationale: format!(
                        "{band} {} {}: theta {theta:.2}/day with {days} days left favors premium sellers",
                        candidate.strike, candidate.kind
                    ),
                }
            }
            Some(_) => Classification {
                recommendation: Recommendation::Hold,
                confidence: None,
                band,
                rationale: format!(
                    "{band} {} {}: no breakdown, spot {} holds above {}",
                    candidate.strike,
                    candidate.kind,
                    candidate.spot,
                    candidate.breakdown_level.unwrap_or(candidate.strike)
                ),
            },
            None => Classification {
                recommendation: Recommendation::Hold,
                confidence: None,
                band,
                rationale: format!(
                    "{band} {} {}: delta {delta:.3}, theta {theta:.2}/day, {days} days do not meet BUY thresholds",
                    candidate.strike, candidate.kind
                ),
            },
        };

        tracing::debug!(
            strike = candidate.strike,
            kind = %candidate.kind,
            %band,
            recommendation = %classification.recommendation,
            confidence = ?classification.confidence,
            "Classified candidate"
        );

        classification
    }

    /// BUY candidates at or above the configured confidence floor, best first.
    ///
    /// Sorted by confidence descending, then days to expiry descending so
    /// equal-confidence trades prefer less decay exposure.
    #[must_use]
    pub fn actionable(
        &self,
        candidates: &[TradeCandidate],
        sentiment: &SentimentScore,
    ) -> Vec<ActionableTrade> {
        let mut trades: Vec<ActionableTrade> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let classification = self.classify(candidate, sentiment);
                let keep = classification.is_actionable()
                    && classification
                        .confidence
                        .is_some_and(|c| c >= self.rules.min_actionable_confidence);
                keep.then(|| ActionableTrade {
                    candidate: candidate.clone(),
                    classification,
                })
            })
            .collect();

        trades.sort_by(|a, b| {
            b.confidence()
                .cmp(&a.confidence())
                .then_with(|| b.candidate.days_to_expiry.cmp(&a.candidate.days_to_expiry))
        });
        trades
    }

    fn base_confidence(
        &self,
        band: StrikeBand,
        delta: f64,
        theta: f64,
        days: u32,
    ) -> Option<Confidence> {
        let rules = &self.rules;
        match band {
            StrikeBand::Atm => (delta > rules.atm_min_delta && theta > rules.max_daily_decay)
                .then(|| {
                    if theta > rules.high_confidence_theta {
                        Confidence::High
                    } else {
                        Confidence::Medium
                    }
                }),
            StrikeBand::Otm => (days > rules.otm_min_days && delta > rules.otm_min_delta).then(
                || {
                    if days > rules.otm_medium_days {
                        Confidence::Medium
                    } else {
                        Confidence::Low
                    }
                },
            ),
            StrikeBand::Itm => (delta > rules.itm_min_delta).then_some(Confidence::High),
        }
    }
}

/// Only `Medium` is promoted by a favorable trend.
fn adjust_for_sentiment(
    confidence: Confidence,
    kind: OptionKind,
    sentiment: &SentimentScore,
) -> Confidence {
    if sentiment.opposes(kind) {
        confidence.lower()
    } else if sentiment.favors(kind) && confidence == Confidence::Medium {
        confidence.raise()
    } else {
        confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Money;
    use crate::pricing::Greeks;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn candidate(
        strike: f64,
        kind: OptionKind,
        delta: f64,
        theta: f64,
        days: u32,
    ) -> TradeCandidate {
        TradeCandidate {
            strike,
            kind,
            premium: Money::new(dec!(120)),
            days_to_expiry: days,
            greeks: Greeks {
                delta,
                gamma: 0.0005,
                theta,
                vega: 12.0,
                rho: 1.5,
            },
            spot: 26_010.0,
            breakdown_level: None,
        }
    }

    fn engine() -> RecommendationEngine {
        RecommendationEngine::default()
    }

    #[test_case(0.55, -4.0 => (Recommendation::Buy, Some(Confidence::High)); "slow decay is high")]
    #[test_case(0.55, -7.0 => (Recommendation::Buy, Some(Confidence::Medium)); "moderate decay is medium")]
    #[test_case(0.55, -10.0 => (Recommendation::Hold, None); "decay limit blocks buy")]
    #[test_case(0.45, -4.0 => (Recommendation::Hold, None); "low delta holds")]
    fn atm_call(delta: f64, theta: f64) -> (Recommendation, Option<Confidence>) {
        let c = engine().classify(
            &candidate(26_000.0, OptionKind::Call, delta, theta, 10),
            &SentimentScore::neutral(),
        );
        assert_eq!(c.band, StrikeBand::Atm);
        (c.recommendation, c.confidence)
    }

    #[test_case(15, 0.35 => Some(Confidence::Medium); "two weeks out")]
    #[test_case(10, 0.35 => Some(Confidence::Low); "ten days out")]
    #[test_case(7, 0.35 => None; "seven days is not enough")]
    #[test_case(20, 0.25 => None; "delta too low")]
    fn otm_call(days: u32, delta: f64) -> Option<Confidence> {
        engine()
            .classify(
                &candidate(26_200.0, OptionKind::Call, delta, -3.0, days),
                &SentimentScore::neutral(),
            )
            .confidence
    }

    #[test]
    fn itm_call_high_delta_is_high_confidence() {
        let c = engine().classify(
            &candidate(25_800.0, OptionKind::Call, 0.82, -6.0, 5),
            &SentimentScore::neutral(),
        );
        assert_eq!(c.band, StrikeBand::Itm);
        assert_eq!(c.recommendation, Recommendation::Buy);
        assert_eq!(c.confidence, Some(Confidence::High));
    }

    #[test]
    fn put_requires_breakdown() {
        // ITM put: spot below strike is itself the breakdown.
        let itm = candidate(26_200.0, OptionKind::Put, -0.75, -5.0, 10);
        let c = engine().classify(&itm, &SentimentScore::neutral());
        assert_eq!(c.recommendation, Recommendation::Buy);

        // OTM put with enough delta but spot above the strike.
        let otm = candidate(25_900.0, OptionKind::Put, -0.35, -3.0, 20);
        let c = engine().classify(&otm, &SentimentScore::neutral());
        assert_eq!(c.recommendation, Recommendation::Hold);
        assert!(c.rationale.contains("no breakdown"));

        let confirmed = TradeCandidate {
            breakdown_level: Some(26_050.0),
            ..otm
        };
        let c = engine().classify(&confirmed, &SentimentScore::neutral());
        assert_eq!(c.recommendation, Recommendation::Buy);
        assert_eq!(c.confidence, Some(Confidence::Medium));
    }

    #[test]
    fn fast_decay_near_expiry_is_sell() {
        let c = engine().classify(
            &candidate(26_300.0, OptionKind::Call, 0.2, -12.0, 3),
            &SentimentScore::neutral(),
        );
        assert_eq!(c.recommendation, Recommendation::Sell);
        assert_eq!(c.confidence, None);

        // Same decay with a week left is only a HOLD.
        let c = engine().classify(
            &candidate(26_300.0, OptionKind::Call, 0.2, -12.0, 7),
            &SentimentScore::neutral(),
        );
        assert_eq!(c.recommendation, Recommendation::Hold);
    }

    #[test]
    fn sentiment_flips_medium_atm_call() {
        let medium = candidate(26_000.0, OptionKind::Call, 0.55, -7.0, 10);

        let bullish = engine().classify(&medium, &SentimentScore::new(25.0));
        assert_eq!(bullish.confidence, Some(Confidence::High));

        let bearish = engine().classify(&medium, &SentimentScore::new(-25.0));
        assert_eq!(bearish.confidence, Some(Confidence::Low));

        let neutral = engine().classify(&medium, &SentimentScore::neutral());
        assert_eq!(neutral.confidence, Some(Confidence::Medium));
    }

    #[test]
    fn favorable_trend_leaves_low_confidence() {
        let low = candidate(26_200.0, OptionKind::Call, 0.35, -3.0, 10);
        let c = engine().classify(&low, &SentimentScore::new(25.0));
        assert_eq!(c.confidence, Some(Confidence::Low));
    }

    #[test]
    fn bullish_sentiment_lowers_puts() {
        let put = candidate(26_200.0, OptionKind::Put, -0.75, -5.0, 10);
        let c = engine().classify(&put, &SentimentScore::new(25.0));
        assert_eq!(c.confidence, Some(Confidence::Medium));
    }

    #[test]
    fn actionable_sorts_by_confidence_then_days() {
        let candidates = vec![
            candidate(26_200.0, OptionKind::Call, 0.35, -3.0, 10), // OTM LOW
            candidate(26_000.0, OptionKind::Call, 0.55, -7.0, 10), // ATM MEDIUM
            candidate(25_800.0, OptionKind::Call, 0.82, -6.0, 5),  // ITM HIGH, 5d
            candidate(25_700.0, OptionKind::Call, 0.88, -5.0, 12), // ITM HIGH, 12d
            candidate(26_400.0, OptionKind::Call, 0.10, -1.0, 10), // HOLD
        ];

        let trades = engine().actionable(&candidates, &SentimentScore::neutral());
        let order: Vec<(f64, Confidence)> = trades
            .iter()
            .map(|t| (t.candidate.strike, t.confidence()))
            .collect();

        assert_eq!(
            order,
            vec![
                (25_700.0, Confidence::High),
                (25_800.0, Confidence::High),
                (26_000.0, Confidence::Medium),
                (26_200.0, Confidence::Low),
            ]
        );
    }

    #[test]
    fn actionable_respects_confidence_floor() {
        let rules = RecommendationRules {
            min_actionable_confidence: Confidence::Medium,
            ..RecommendationRules::default()
        };
        let candidates = vec![
            candidate(26_200.0, OptionKind::Call, 0.35, -3.0, 10),
            candidate(26_000.0, OptionKind::Call, 0.55, -7.0, 10),
        ];
        let trades =
            RecommendationEngine::new(rules).actionable(&candidates, &SentimentScore::neutral());
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].candidate.strike, 26_000.0);
    }
}
