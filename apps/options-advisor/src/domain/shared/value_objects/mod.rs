//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.

mod contract;
mod identifiers;
mod money;

pub use contract::OptionContract;
pub use identifiers::{PositionId, Symbol, UserId};
pub use money::Money;
