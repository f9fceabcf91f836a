//! Recommendation Bounded Context
//!
//! Turns a priced candidate plus market sentiment into BUY/SELL/HOLD with a
//! confidence tier. Rules are banded by strike position (ATM/ITM/OTM) and
//! then nudged by sentiment alignment.

pub mod services;
pub mod value_objects;

pub use services::RecommendationEngine;
pub use value_objects::{
    ActionableTrade, Classification, Confidence, Recommendation, RecommendationRules, StrikeBand,
    TradeCandidate,
};
