//! Evaluate Watchlist Use Case

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::{PositionRepositoryPort, QuoteSourcePort};
use crate::domain::position::{PositionAssessment, PositionEvaluator, TrackedPosition};
use crate::domain::sentiment::SentimentScore;
use crate::domain::shared::UserId;
use crate::error::AdvisorError;

/// One evaluated watchlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Position with its refreshed price.
    pub position: TrackedPosition,
    /// Evaluation at that price.
    pub assessment: PositionAssessment,
    /// The quote source failed and the last stored price was used.
    pub stale_price: bool,
}

/// Use case for refreshing and evaluating a user's active positions.
pub struct EvaluateWatchlistUseCase<Q, R>
where
    Q: QuoteSourcePort,
    R: PositionRepositoryPort,
{
    quotes: Arc<Q>,
    positions: Arc<R>,
    evaluator: PositionEvaluator,
}

impl<Q, R> EvaluateWatchlistUseCase<Q, R>
where
    Q: QuoteSourcePort,
    R: PositionRepositoryPort,
{
    /// Create a new `EvaluateWatchlistUseCase`.
    pub const fn new(quotes: Arc<Q>, positions: Arc<R>, evaluator: PositionEvaluator) -> Self {
        Self {
            quotes,
            positions,
            evaluator,
        }
    }

    /// Execute the use case.
    ///
    /// A failed price lookup does not fail the run: the entry is evaluated
    /// at its last stored price and flagged stale.
    #[tracing::instrument(skip(self, sentiment))]
    pub async fn execute(
        &self,
        user_id: &UserId,
        sentiment: &SentimentScore,
    ) -> Result<Vec<WatchlistEntry>, AdvisorError> {
        let active = self.positions.active_for_user(user_id).await?;
        let mut entries = Vec::with_capacity(active.len());

        for mut tracked in active {
            let stale_price = match self.quotes.last_price(&tracked.contract).await {
                Ok(price) => {
                    tracked.position.update_price(price);
                    if let Err(e) = self.positions.save(&tracked).await {
                        tracing::warn!(
                            position_id = %tracked.id,
                            error = %e,
                            "Failed to store refreshed price"
                        );
                    }
                    false
                }
                Err(e) => {
                    tracing::warn!(
                        position_id = %tracked.id,
                        contract = %tracked.contract,
                        error = %e,
                        "Price refresh failed, evaluating at last stored price"
                    );
                    true
                }
            };

            let assessment = self.evaluator.evaluate(&tracked.position, sentiment);
            tracing::debug!(
                position_id = %tracked.id,
                state = %assessment.state,
                price = %tracked.position.current_price,
                "Evaluated position"
            );

            entries.push(WatchlistEntry {
                position: tracked,
                assessment,
                stale_price,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{OptionQuote, QuoteError};
    use crate::domain::position::{OpenPosition, PositionState};
    use crate::domain::risk_plan::RiskPlan;
    use crate::domain::shared::{Money, OptionContract, Symbol};
    use crate::infrastructure::persistence::InMemoryPositionRepository;
    use crate::pricing::{ExpiryDate, OptionKind};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    // Mock quote source keyed by strike
    struct MockQuotes {
        prices: HashMap<u32, Money>,
    }

    #[async_trait]
    impl QuoteSourcePort for MockQuotes {
        async fn spot(&self, _symbol: &Symbol) -> Result<f64, QuoteError> {
            Ok(26_000.0)
        }

        async fn option_chain(
            &self,
            _symbol: &Symbol,
            _expiry: ExpiryDate,
        ) -> Result<Vec<OptionQuote>, QuoteError> {
            Ok(Vec::new())
        }

        async fn last_price(&self, contract: &OptionContract) -> Result<Money, QuoteError> {
            self.prices
                .get(&(contract.strike as u32))
                .copied()
                .ok_or_else(|| QuoteError::Unavailable {
                    message: "no tick".to_string(),
                })
        }
    }

    fn tracked(user: &str, strike: f64) -> TrackedPosition {
        let plan = RiskPlan::new(
            Money::new(dec!(150)),
            Money::new(dec!(120)),
            Money::new(dec!(180)),
            None,
        )
        .unwrap();
        TrackedPosition::open(
            UserId::new(user),
            OptionContract::new("NIFTY", strike, OptionKind::Call, "28-Nov-2025".parse().unwrap()),
            OpenPosition::new(OptionKind::Call, plan, 1, 75).unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn refreshes_and_evaluates_active_positions() {
        let repo = Arc::new(InMemoryPositionRepository::new());
        let stopped = tracked("u1", 26_000.0);
        let target = tracked("u1", 26_100.0);
        let other_user = tracked("u2", 26_000.0);
        for p in [&stopped, &target, &other_user] {
            repo.save(p).await.unwrap();
        }

        let quotes = Arc::new(MockQuotes {
            prices: HashMap::from([
                (26_000, Money::new(dec!(119))),
                (26_100, Money::new(dec!(183))),
            ]),
        });
        let use_case =
            EvaluateWatchlistUseCase::new(quotes, Arc::clone(&repo), PositionEvaluator::default());

        let entries = use_case
            .execute(&UserId::new("u1"), &SentimentScore::neutral())
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);

        let by_id = |id| entries.iter().find(|e| &e.position.id == id).unwrap();
        let exit = by_id(&stopped.id);
        assert_eq!(exit.assessment.state, PositionState::Exit);
        assert_eq!(exit.assessment.pnl, Money::new(dec!(-2325)));
        assert!(!exit.stale_price);

        assert_eq!(by_id(&target.id).assessment.state, PositionState::TargetHit);

        let stored = repo.find_by_id(&stopped.id).await.unwrap().unwrap();
        assert_eq!(stored.position.current_price, Money::new(dec!(119)));
    }

    #[tokio::test]
    async fn quote_failure_uses_stored_price() {
        let repo = Arc::new(InMemoryPositionRepository::new());
        let p = tracked("u1", 26_500.0);
        repo.save(&p).await.unwrap();

        let quotes = Arc::new(MockQuotes {
            prices: HashMap::new(),
        });
        let use_case = EvaluateWatchlistUseCase::new(quotes, repo, PositionEvaluator::default());

        let entries = use_case
            .execute(&UserId::new("u1"), &SentimentScore::neutral())
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].stale_price);
        assert_eq!(entries[0].assessment.state, PositionState::Hold);
        assert_eq!(entries[0].assessment.pnl, Money::ZERO);
    }
}
