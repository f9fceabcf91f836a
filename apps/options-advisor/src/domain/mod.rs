//! Domain Layer
//!
//! Advisory rules with no infrastructure dependencies. Pricing lives in
//! [`crate::pricing`]; the domain consumes its Greeks but never re-prices.
//!
//! # Bounded Contexts
//!
//! - [`sentiment`]: Weighted market-factor tally
//! - [`recommendation`]: BUY/SELL/HOLD with confidence tiers
//! - [`risk_plan`]: Stop-loss/target auto-sizing and validation
//! - [`position`]: Open position monitoring and conviction heuristic

pub mod position;
pub mod recommendation;
pub mod risk_plan;
pub mod sentiment;
pub mod shared;
