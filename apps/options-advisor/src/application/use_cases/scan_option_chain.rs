//! Scan Option Chain Use Case
//!
//! Prices every quoted strike of one expiry, classifies the candidates and
//! turns the actionable ones into trade cards with a default risk plan.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::application::ports::{OptionQuote, QuoteSourcePort};
use crate::domain::recommendation::{Classification, RecommendationEngine, TradeCandidate};
use crate::domain::risk_plan::{RiskPlan, RiskValidator};
use crate::domain::sentiment::SentimentScore;
use crate::domain::shared::Symbol;
use crate::error::AdvisorError;
use crate::pricing::{
    DEFAULT_RISK_FREE_RATE, ExchangeCalendar, ExpiryDate, IvSolver, MarketParameters,
    PricingContext, price,
};

/// What to scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Underlying.
    pub symbol: Symbol,
    /// Expiry to scan.
    pub expiry: ExpiryDate,
    /// Support level confirming a bearish setup for puts.
    #[serde(default)]
    pub breakdown_level: Option<f64>,
    /// Valuation instant.
    pub now: DateTime<Utc>,
}

/// An actionable trade with its default plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeCard {
    /// Priced contract.
    pub candidate: TradeCandidate,
    /// BUY with confidence.
    pub classification: Classification,
    /// Auto-sized stop loss and targets at the quoted premium.
    pub plan: RiskPlan,
    /// Underlying level at which the trade breaks even at expiry.
    pub breakeven: f64,
}

/// Outcome of a chain scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainScan {
    /// Underlying.
    pub symbol: Symbol,
    /// Scanned expiry.
    pub expiry: ExpiryDate,
    /// Spot used for pricing.
    pub spot: f64,
    /// Sentiment applied to the classification.
    pub sentiment: SentimentScore,
    /// Quotes that were priced.
    pub priced: usize,
    /// Quotes skipped for missing premium or invalid inputs.
    pub skipped: usize,
    /// Actionable trades, best first.
    pub cards: Vec<TradeCard>,
}

/// Use case for scanning an option chain.
pub struct ScanOptionChainUseCase<Q>
where
    Q: QuoteSourcePort,
{
    quotes: Arc<Q>,
    engine: RecommendationEngine,
    validator: RiskValidator,
    solver: IvSolver,
    calendar: ExchangeCalendar,
    risk_free_rate: f64,
}

impl<Q> ScanOptionChainUseCase<Q>
where
    Q: QuoteSourcePort,
{
    /// Create a new `ScanOptionChainUseCase` with the default solver, calendar and rate.
    pub fn new(quotes: Arc<Q>, engine: RecommendationEngine, validator: RiskValidator) -> Self {
        Self {
            quotes,
            engine,
            validator,
            solver: IvSolver::default(),
            calendar: ExchangeCalendar::default(),
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Use a configured IV solver.
    #[must_use]
    pub fn with_solver(mut self, solver: IvSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Use a configured settlement calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: ExchangeCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Use a configured risk-free rate.
    #[must_use]
    pub fn with_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Execute the use case.
    #[tracing::instrument(skip_all, fields(symbol = %request.symbol, expiry = %request.expiry))]
    pub async fn execute(
        &self,
        request: &ScanRequest,
        sentiment: &SentimentScore,
    ) -> Result<ChainScan, AdvisorError> {
        // 1. Fetch market data
        let spot = self.quotes.spot(&request.symbol).await?;
        let chain = self
            .quotes
            .option_chain(&request.symbol, request.expiry)
            .await?;

        // 2. Price every strike
        let ctx = PricingContext::new(request.now)
            .with_calendar(self.calendar)
            .with_rate(self.risk_free_rate);
        let candidates: Vec<TradeCandidate> = chain
            .par_iter()
            .filter_map(|quote| self.candidate(&ctx, spot, quote, request.breakdown_level))
            .collect();
        let skipped = chain.len() - candidates.len();
        if skipped > 0 {
            tracing::debug!(skipped, total = chain.len(), "Skipped unpriceable quotes");
        }

        // 3. Classify and size
        let cards: Vec<TradeCard> = self
            .engine
            .actionable(&candidates, sentiment)
            .into_iter()
            .map(|trade| TradeCard {
                plan: self.validator.auto_size(trade.candidate.premium),
                breakeven: trade.candidate.breakeven(),
                candidate: trade.candidate,
                classification: trade.classification,
            })
            .collect();

        tracing::info!(
            spot,
            priced = candidates.len(),
            actionable = cards.len(),
            sentiment = %sentiment.classification,
            "Chain scan complete"
        );

        Ok(ChainScan {
            symbol: request.symbol.clone(),
            expiry: request.expiry,
            spot,
            sentiment: *sentiment,
            priced: candidates.len(),
            skipped,
            cards,
        })
    }

    fn candidate(
        &self,
        ctx: &PricingContext,
        spot: f64,
        quote: &OptionQuote,
        breakdown_level: Option<f64>,
    ) -> Option<TradeCandidate> {
        if !quote.last_price.is_positive() {
            return None;
        }
        let years = ctx.years_to(quote.expiry);

        let iv_percent = match quote.quoted_iv() {
            Some(iv) => iv,
            None => {
                let estimate = self
                    .solver
                    .solve(
                        quote.last_price.to_f64(),
                        spot,
                        quote.strike,
                        years,
                        ctx.risk_free_rate,
                        quote.kind,
                    )
                    .ok()?;
                if !estimate.converged {
                    tracing::warn!(
                        strike = quote.strike,
                        kind = %quote.kind,
                        iv = estimate.volatility_percent,
                        last_error = estimate.last_error,
                        "Implied volatility did not converge, using best estimate"
                    );
                }
                estimate.volatility_percent
            }
        };

        let params = MarketParameters::new(
            spot,
            quote.strike,
            years,
            ctx.risk_free_rate,
            iv_percent / 100.0,
            quote.kind,
        );
        match price(params) {
            Ok(pricing) => Some(TradeCandidate {
                strike: quote.strike,
                kind: quote.kind,
                premium: quote.last_price,
                days_to_expiry: ctx.days_to(quote.expiry),
                greeks: pricing.greeks,
                spot,
                breakdown_level,
            }),
            Err(e) => {
                tracing::warn!(
                    strike = quote.strike,
                    kind = %quote.kind,
                    error = %e,
                    "Failed to price quote"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::QuoteError;
    use crate::domain::recommendation::{Confidence, RecommendationRules};
    use crate::domain::risk_plan::RiskRules;
    use crate::domain::shared::{Money, OptionContract};
    use crate::pricing::OptionKind;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    struct MockQuotes {
        spot: f64,
        chain: Vec<OptionQuote>,
    }

    #[async_trait]
    impl QuoteSourcePort for MockQuotes {
        async fn spot(&self, _symbol: &Symbol) -> Result<f64, QuoteError> {
            Ok(self.spot)
        }

        async fn option_chain(
            &self,
            _symbol: &Symbol,
            _expiry: ExpiryDate,
        ) -> Result<Vec<OptionQuote>, QuoteError> {
            Ok(self.chain.clone())
        }

        async fn last_price(&self, contract: &OptionContract) -> Result<Money, QuoteError> {
            Err(QuoteError::ContractNotFound {
                contract: contract.to_string(),
            })
        }
    }

    struct DownQuotes;

    #[async_trait]
    impl QuoteSourcePort for DownQuotes {
        async fn spot(&self, _symbol: &Symbol) -> Result<f64, QuoteError> {
            Err(QuoteError::Unavailable {
                message: "feed offline".to_string(),
            })
        }

        async fn option_chain(
            &self,
            _symbol: &Symbol,
            _expiry: ExpiryDate,
        ) -> Result<Vec<OptionQuote>, QuoteError> {
            Ok(Vec::new())
        }

        async fn last_price(&self, _contract: &OptionContract) -> Result<Money, QuoteError> {
            Ok(Money::ZERO)
        }
    }

    fn expiry() -> ExpiryDate {
        "28-Nov-2025".parse().unwrap()
    }

    // 10:00 IST, a little over ten days before settlement.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 18, 4, 30, 0).unwrap()
    }

    fn quote(strike: f64, kind: OptionKind, iv: Option<f64>, premium: Money) -> OptionQuote {
        OptionQuote {
            strike,
            kind,
            iv_percent: iv,
            expiry: expiry(),
            last_price: premium,
        }
    }

    fn model_premium(strike: f64, kind: OptionKind) -> Money {
        let ctx = PricingContext::new(now());
        let pricing = price(MarketParameters::new(
            26_000.0,
            strike,
            ctx.years_to(expiry()),
            DEFAULT_RISK_FREE_RATE,
            0.14,
            kind,
        ))
        .unwrap();
        Money::try_from_f64(pricing.theoretical_price).unwrap().round()
    }

    fn use_case(chain: Vec<OptionQuote>) -> ScanOptionChainUseCase<MockQuotes> {
        ScanOptionChainUseCase::new(
            Arc::new(MockQuotes {
                spot: 26_000.0,
                chain,
            }),
            RecommendationEngine::new(RecommendationRules::default()),
            RiskValidator::new(RiskRules::default()),
        )
    }

    fn request(breakdown_level: Option<f64>) -> ScanRequest {
        ScanRequest {
            symbol: Symbol::new("NIFTY"),
            expiry: expiry(),
            breakdown_level,
            now: now(),
        }
    }

    #[tokio::test]
    async fn scan_ranks_actionable_strikes() {
        let chain = vec![
            // ATM call decays faster than 10/day: HOLD
            quote(26_000.0, OptionKind::Call, Some(14.0), Money::new(dec!(300))),
            // deep ITM call: BUY HIGH
            quote(25_600.0, OptionKind::Call, Some(14.0), Money::new(dec!(520))),
            // OTM call without quoted IV: solved, BUY LOW
            quote(26_300.0, OptionKind::Call, None, model_premium(26_300.0, OptionKind::Call)),
            // OTM put, breakdown confirmed below 26100: BUY LOW
            quote(25_800.0, OptionKind::Put, Some(14.0), Money::new(dec!(90))),
            // no trade printed
            quote(26_500.0, OptionKind::Call, None, Money::ZERO),
        ];

        let scan = use_case(chain)
            .execute(&request(Some(26_100.0)), &SentimentScore::neutral())
            .await
            .unwrap();

        assert_eq!(scan.priced, 4);
        assert_eq!(scan.skipped, 1);
        assert_eq!(scan.cards.len(), 3);

        let best = &scan.cards[0];
        assert_eq!(best.candidate.strike, 25_600.0);
        assert_eq!(best.classification.confidence, Some(Confidence::High));
        assert_eq!(best.candidate.days_to_expiry, 11);
        assert_eq!(best.plan.stop_loss, Money::new(dec!(338.00)));
        assert_eq!(best.plan.target1, Money::new(dec!(858.00)));
        assert_eq!(best.breakeven, 26_120.0);

        let solved = scan
            .cards
            .iter()
            .find(|c| c.candidate.strike == 26_300.0)
            .unwrap();
        assert_eq!(solved.classification.confidence, Some(Confidence::Low));
        assert!((solved.candidate.greeks.delta - 0.345).abs() < 0.01);

        let put = scan
            .cards
            .iter()
            .find(|c| c.candidate.kind == OptionKind::Put)
            .unwrap();
        assert_eq!(put.breakeven, 25_710.0);
    }

    #[tokio::test]
    async fn puts_need_breakdown() {
        let chain = vec![quote(
            25_800.0,
            OptionKind::Put,
            Some(14.0),
            Money::new(dec!(90)),
        )];

        let scan = use_case(chain)
            .execute(&request(None), &SentimentScore::neutral())
            .await
            .unwrap();

        assert_eq!(scan.priced, 1);
        assert!(scan.cards.is_empty());
    }

    #[tokio::test]
    async fn quote_failure_propagates() {
        let use_case = ScanOptionChainUseCase::new(
            Arc::new(DownQuotes),
            RecommendationEngine::default(),
            RiskValidator::new(RiskRules::default()),
        );

        let err = use_case
            .execute(&request(None), &SentimentScore::neutral())
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::QuoteUnavailable);
    }
}
