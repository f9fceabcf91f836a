//! Position Value Objects

mod assessment;
mod open_position;
mod rules;
mod tracked_position;

pub use assessment::{AssessmentSource, HeuristicScore, PositionAssessment, PositionState};
pub use open_position::OpenPosition;
pub use rules::PositionRules;
pub use tracked_position::{PositionStatus, TrackedPosition};
