//! Recommendation Value Objects

mod candidate;
mod classification;
mod rules;

pub use candidate::{StrikeBand, TradeCandidate};
pub use classification::{ActionableTrade, Classification, Confidence, Recommendation};
pub use rules::RecommendationRules;
