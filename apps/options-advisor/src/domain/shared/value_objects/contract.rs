//! Listed option contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Symbol;
use crate::pricing::{ExpiryDate, OptionKind};

/// A listed index option: underlying, strike, type and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying index.
    pub symbol: Symbol,
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub kind: OptionKind,
    /// Expiry date.
    pub expiry: ExpiryDate,
}

impl OptionContract {
    /// Create a contract.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        strike: f64,
        kind: OptionKind,
        expiry: ExpiryDate,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            strike,
            kind,
            expiry,
        }
    }

    /// Cache and lookup key, e.g. `NIFTY|28-Nov-2025|26000|CE`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}|{}|{}|{}", self.symbol, self.expiry, self.strike, self.kind)
    }
}

impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.symbol, self.expiry, self.strike, self.kind)
    }
}
