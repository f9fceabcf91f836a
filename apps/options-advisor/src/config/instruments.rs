//! Per-underlying contract specifications.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Contract specification of one underlying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Units per lot.
    pub lot_size: u32,
    /// Distance between listed strikes.
    pub strike_step: f64,
}

/// Known underlyings keyed by symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentsConfig(HashMap<Symbol, InstrumentSpec>);

impl Default for InstrumentsConfig {
    fn default() -> Self {
        Self(HashMap::from([
            (
                Symbol::new("NIFTY"),
                InstrumentSpec {
                    lot_size: 75,
                    strike_step: 50.0,
                },
            ),
            (
                Symbol::new("BANKNIFTY"),
                InstrumentSpec {
                    lot_size: 35,
                    strike_step: 100.0,
                },
            ),
        ]))
    }
}

impl InstrumentsConfig {
    /// Specification for `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&InstrumentSpec> {
        self.0.get(symbol)
    }

    /// Iterate over all configured underlyings.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &InstrumentSpec)> {
        self.0.iter()
    }

    /// Lot sizes keyed by symbol.
    #[must_use]
    pub fn lot_sizes(&self) -> HashMap<Symbol, u32> {
        self.0
            .iter()
            .map(|(symbol, spec)| (symbol.clone(), spec.lot_size))
            .collect()
    }
}
