//! Market Sentiment Bounded Context
//!
//! Weighted tally of named market factors (FII flows, global cues, technical
//! levels) into a single net score in `[-100, 100]`. The score is an input
//! to recommendations and position monitoring; the core never fetches the
//! factors itself.

mod score;

pub use score::{
    FactorImpact, MarketFactor, SentimentClassification, SentimentScore, SentimentStrength,
};
