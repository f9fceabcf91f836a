//! Quote source backed by a captured market snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{OptionQuote, QuoteError, QuoteSourcePort};
use crate::domain::shared::{Money, OptionContract, Symbol};
use crate::pricing::ExpiryDate;

/// Spot and chain of one underlying at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Underlying.
    pub symbol: Symbol,
    /// Spot price.
    pub spot: f64,
    /// Chain rows, any expiry.
    #[serde(default)]
    pub quotes: Vec<OptionQuote>,
}

/// Serves quotes from in-memory snapshots keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct SnapshotQuoteSource {
    markets: HashMap<Symbol, MarketSnapshot>,
}

impl SnapshotQuoteSource {
    /// Build from snapshots; a later snapshot of the same symbol replaces an earlier one.
    #[must_use]
    pub fn new(snapshots: impl IntoIterator<Item = MarketSnapshot>) -> Self {
        let markets = snapshots
            .into_iter()
            .map(|s| (s.symbol.clone(), s))
            .collect();
        Self { markets }
    }

    fn market(&self, symbol: &Symbol) -> Result<&MarketSnapshot, QuoteError> {
        self.markets
            .get(symbol)
            .ok_or_else(|| QuoteError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}

#[async_trait]
impl QuoteSourcePort for SnapshotQuoteSource {
    async fn spot(&self, symbol: &Symbol) -> Result<f64, QuoteError> {
        self.market(symbol).map(|m| m.spot)
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiry: ExpiryDate,
    ) -> Result<Vec<OptionQuote>, QuoteError> {
        let market = self.market(symbol)?;
        Ok(market
            .quotes
            .iter()
            .filter(|q| q.expiry == expiry)
            .cloned()
            .collect())
    }

    async fn last_price(&self, contract: &OptionContract) -> Result<Money, QuoteError> {
        let market = self.market(&contract.symbol)?;
        market
            .quotes
            .iter()
            .find(|q| q.contract(&market.symbol) == *contract)
            .map(|q| q.last_price)
            .ok_or_else(|| QuoteError::ContractNotFound {
                contract: contract.to_string(),
            })
    }
}
