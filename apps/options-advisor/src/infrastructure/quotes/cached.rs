//! Caching decorator for quote sources.
//!
//! Spots and chains are cached per key for a fixed TTL. `last_price` is served
//! from a cached chain of the contract's expiry when one is fresh and goes to
//! the wrapped source otherwise.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{OptionQuote, QuoteCachePort, QuoteError, QuoteSourcePort};
use crate::domain::shared::{Money, OptionContract, Symbol};
use crate::pricing::ExpiryDate;

/// Wraps a [`QuoteSourcePort`] with TTL caches.
pub struct CachedQuoteSource<S> {
    inner: S,
    spots: Arc<dyn QuoteCachePort<f64>>,
    chains: Arc<dyn QuoteCachePort<Vec<OptionQuote>>>,
    ttl: Duration,
}

impl<S> CachedQuoteSource<S>
where
    S: QuoteSourcePort,
{
    /// Wrap `inner`, caching every fetched value for `ttl`.
    pub fn new(
        inner: S,
        spots: Arc<dyn QuoteCachePort<f64>>,
        chains: Arc<dyn QuoteCachePort<Vec<OptionQuote>>>,
        ttl: Duration,
    ) -> Self {
        Self {
            inner,
            spots,
            chains,
            ttl,
        }
    }
}

fn chain_key(symbol: &Symbol, expiry: ExpiryDate) -> String {
    format!("chain|{symbol}|{expiry}")
}

#[async_trait]
impl<S> QuoteSourcePort for CachedQuoteSource<S>
where
    S: QuoteSourcePort,
{
    async fn spot(&self, symbol: &Symbol) -> Result<f64, QuoteError> {
        let key = format!("spot|{symbol}");
        if let Some(spot) = self.spots.get(&key) {
            return Ok(spot);
        }
        let spot = self.inner.spot(symbol).await?;
        self.spots.put(&key, spot, self.ttl);
        Ok(spot)
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiry: ExpiryDate,
    ) -> Result<Vec<OptionQuote>, QuoteError> {
        let key = chain_key(symbol, expiry);
        if let Some(chain) = self.chains.get(&key) {
            tracing::debug!(%symbol, %expiry, "chain cache hit");
            return Ok(chain);
        }
        let chain = self.inner.option_chain(symbol, expiry).await?;
        self.chains.put(&key, chain.clone(), self.ttl);
        Ok(chain)
    }

    async fn last_price(&self, contract: &OptionContract) -> Result<Money, QuoteError> {
        let cached = self
            .chains
            .get(&chain_key(&contract.symbol, contract.expiry))
            .and_then(|chain| {
                chain
                    .into_iter()
                    .find(|q| q.contract(&contract.symbol) == *contract)
            });
        match cached {
            Some(quote) => Ok(quote.last_price),
            None => self.inner.last_price(contract).await,
        }
    }
}
