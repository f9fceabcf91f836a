//! Position Monitoring Bounded Context
//!
//! Evaluates an open long option against its stop loss and targets on every
//! price refresh. The evaluator only recommends; closing a position is a
//! persistence action owned by the watchlist.

pub mod services;
pub mod value_objects;

pub use services::PositionEvaluator;
pub use value_objects::{
    AssessmentSource, HeuristicScore, OpenPosition, PositionAssessment, PositionRules,
    PositionState, PositionStatus, TrackedPosition,
};
