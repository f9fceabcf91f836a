//! Risk Plan Bounded Context
//!
//! Stop-loss and target levels for a long option bought at an entry premium:
//! default sizing when the user omits them, and advisory validation when the
//! user supplies them. Validation never rejects a plan; it returns warnings
//! with suggested replacements.

pub mod services;
pub mod value_objects;

pub use services::RiskValidator;
pub use value_objects::{PlanSuggestion, RiskAssessment, RiskPlan, RiskRules, RiskWarning};
