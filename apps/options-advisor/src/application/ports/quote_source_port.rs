//! Quote Source Port (Driven Port)
//!
//! Interface for spot prices and option chains from the exchange feed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, OptionContract, Symbol};
use crate::pricing::{ExpiryDate, OptionKind};

/// One row of an option chain as quoted by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub kind: OptionKind,
    /// Implied volatility in percent; absent or zero when the exchange has none.
    #[serde(default)]
    pub iv_percent: Option<f64>,
    /// Expiry (`DD-MMM-YYYY` on the wire).
    pub expiry: ExpiryDate,
    /// Last traded premium.
    pub last_price: Money,
}

impl OptionQuote {
    /// Quoted IV if it is usable.
    #[must_use]
    pub fn quoted_iv(&self) -> Option<f64> {
        self.iv_percent.filter(|iv| iv.is_finite() && *iv > 0.0)
    }

    /// Contract identity on `symbol`.
    #[must_use]
    pub fn contract(&self, symbol: &Symbol) -> OptionContract {
        OptionContract::new(symbol.clone(), self.strike, self.kind, self.expiry)
    }
}

/// Quote source error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// Unknown underlying.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// No quote for the contract.
    #[error("No quote for contract: {contract}")]
    ContractNotFound {
        /// The contract.
        contract: String,
    },

    /// Feed unreachable or returned garbage.
    #[error("Quote source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for market data.
#[async_trait]
pub trait QuoteSourcePort: Send + Sync {
    /// Current spot of the underlying.
    async fn spot(&self, symbol: &Symbol) -> Result<f64, QuoteError>;

    /// Full chain for one expiry.
    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiry: ExpiryDate,
    ) -> Result<Vec<OptionQuote>, QuoteError>;

    /// Last traded premium of a contract.
    async fn last_price(&self, contract: &OptionContract) -> Result<Money, QuoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_from_wire() {
        let quote: OptionQuote = serde_json::from_str(
            r#"{"strike":26000,"kind":"PE","iv_percent":0,"expiry":"28-Nov-2025","last_price":"98.40"}"#,
        )
        .unwrap();
        assert_eq!(quote.kind, OptionKind::Put);
        assert_eq!(quote.quoted_iv(), None);
        assert_eq!(quote.contract(&Symbol::new("NIFTY")).key(), "NIFTY|28-Nov-2025|26000|PE");
    }

    #[test]
    fn error_display() {
        let err = QuoteError::ContractNotFound {
            contract: "NIFTY 28-Nov-2025 26000 CE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No quote for contract: NIFTY 28-Nov-2025 26000 CE"
        );
    }
}
