//! Trade candidate and strike band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Money;
use crate::pricing::{Greeks, OptionKind};

/// Where a strike sits relative to spot for its option kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrikeBand {
    /// Nearest strike on the exchange grid.
    Atm,
    /// In the money.
    Itm,
    /// Out of the money.
    Otm,
}

impl StrikeBand {
    /// Place `strike` on the grid around `spot`.
    ///
    /// A strike is ATM when it equals spot rounded to the nearest multiple of
    /// `strike_step`. Strikes off the grid fall through to ITM or OTM.
    #[must_use]
    pub fn of(strike: f64, spot: f64, kind: OptionKind, strike_step: f64) -> Self {
        let atm_strike = (spot / strike_step).round() * strike_step;
        if (strike - atm_strike).abs() < 1e-9 {
            return Self::Atm;
        }
        let in_the_money = match kind {
            OptionKind::Call => strike < spot,
            OptionKind::Put => strike > spot,
        };
        if in_the_money { Self::Itm } else { Self::Otm }
    }
}

impl fmt::Display for StrikeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atm => "ATM",
            Self::Itm => "ITM",
            Self::Otm => "OTM",
        })
    }
}

/// A priced contract ready for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeCandidate {
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub kind: OptionKind,
    /// Observed premium.
    pub premium: Money,
    /// Whole days until settlement.
    pub days_to_expiry: u32,
    /// Greeks at the candidate's spot.
    pub greeks: Greeks,
    /// Underlying spot the Greeks were computed against.
    pub spot: f64,
    /// Support level whose break confirms a bearish setup. Puts fall back to
    /// their strike when absent.
    #[serde(default)]
    pub breakdown_level: Option<f64>,
}

impl TradeCandidate {
    /// Strike band under the given grid.
    #[must_use]
    pub fn band(&self, strike_step: f64) -> StrikeBand {
        StrikeBand::of(self.strike, self.spot, self.kind, strike_step)
    }

    /// Whether spot has broken below the breakdown level.
    #[must_use]
    pub fn in_breakdown(&self) -> bool {
        self.spot < self.breakdown_level.unwrap_or(self.strike)
    }

    /// Premium-adjusted price the underlying must reach at expiry.
    #[must_use]
    pub fn breakeven(&self) -> f64 {
        let premium = self.premium.to_f64();
        match self.kind {
            OptionKind::Call => self.strike + premium,
            OptionKind::Put => self.strike - premium,
        }
    }
}
