//! Risk Plan Value Objects

mod assessment;
mod plan;
mod rules;

pub use assessment::{PlanSuggestion, RiskAssessment, RiskWarning};
pub use plan::RiskPlan;
pub use rules::RiskRules;
