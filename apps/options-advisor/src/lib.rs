// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Options Advisor - Rust Core Library
//!
//! Quantitative decision core for listed index options.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Pricing**: Black-Scholes prices and Greeks, exchange expiry
//!   convention, implied volatility inversion
//!
//! - **Domain**: Advisory rules
//!   - `sentiment`: Weighted market-factor tally
//!   - `recommendation`: BUY/SELL/HOLD with confidence tiers
//!   - `risk_plan`: Stop-loss/target auto-sizing and validation
//!   - `position`: Open position monitoring and conviction heuristic
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `QuoteSourcePort`, `QuoteCachePort`, `PositionRepositoryPort`
//!   - `use_cases`: `ScanOptionChain`, `EvaluateWatchlist`, `AddToWatchlist`, `ClosePosition`
//!
//! - **Infrastructure**: Adapters
//!   - `quotes`: snapshot source, caching decorator
//!   - `cache`: in-memory TTL cache
//!   - `persistence`: in-memory watchlist

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Pricing core - pure functions over market parameters.
pub mod pricing;

/// Domain layer - Advisory rules with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Ambient
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::position::{PositionAssessment, PositionEvaluator, PositionState};
pub use domain::recommendation::{Classification, Confidence, Recommendation, RecommendationEngine};
pub use domain::risk_plan::{RiskAssessment, RiskPlan, RiskValidator};
pub use domain::sentiment::{MarketFactor, SentimentScore};
pub use domain::shared::{Money, OptionContract, Symbol};
pub use error::{AdvisorError, ErrorCode};
pub use pricing::{ExpiryDate, Greeks, OptionKind, OptionPricing, implied_volatility, price};
