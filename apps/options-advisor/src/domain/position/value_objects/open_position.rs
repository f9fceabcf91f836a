//! Open position value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_plan::RiskPlan;
use crate::domain::shared::{DomainError, Money};
use crate::pricing::{Greeks, OptionKind};

/// A long option position with its plan and latest price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Call or put.
    pub kind: OptionKind,
    /// Entry, stop loss and targets.
    pub plan: RiskPlan,
    /// Number of lots.
    pub quantity: u32,
    /// Units per lot for the instrument.
    pub lot_size: u32,
    /// Latest premium.
    pub current_price: Money,
    /// Greeks recorded at entry, if any.
    #[serde(default)]
    pub entry_greeks: Option<Greeks>,
}

impl OpenPosition {
    /// Open a position priced at its entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] for zero quantity or lot size.
    pub fn new(
        kind: OptionKind,
        plan: RiskPlan,
        quantity: u32,
        lot_size: u32,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::invalid("quantity", "must be at least one lot"));
        }
        if lot_size == 0 {
            return Err(DomainError::invalid("lot_size", "must be positive"));
        }
        Ok(Self {
            kind,
            current_price: plan.entry,
            plan,
            quantity,
            lot_size,
            entry_greeks: None,
        })
    }

    /// Attach the Greeks observed at entry.
    #[must_use]
    pub const fn with_entry_greeks(mut self, greeks: Greeks) -> Self {
        self.entry_greeks = Some(greeks);
        self
    }

    /// Replace the latest premium.
    pub fn update_price(&mut self, price: Money) {
        self.current_price = price;
    }

    /// Total units held.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.quantity.saturating_mul(self.lot_size)
    }

    /// `(current - entry) × quantity × lot_size`.
    #[must_use]
    pub fn pnl(&self) -> Money {
        (self.current_price - self.plan.entry) * self.units()
    }

    /// `(current - entry) / entry × 100`; zero when entry is zero.
    #[must_use]
    pub fn pnl_percent(&self) -> Decimal {
        (self.current_price - self.plan.entry)
            .amount()
            .checked_div(self.plan.entry.amount())
            .map_or(Decimal::ZERO, |r| r * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn plan() -> RiskPlan {
        RiskPlan::new(
            Money::new(dec!(150)),
            Money::new(dec!(120)),
            Money::new(dec!(180)),
            Some(Money::new(dec!(210))),
        )
        .unwrap()
    }

    #[test]
    fn pnl_uses_lot_size() {
        let mut pos = OpenPosition::new(OptionKind::Call, plan(), 2, 75).unwrap();
        assert_eq!(pos.current_price, Money::new(dec!(150)));
        assert!(pos.pnl().is_zero());

        pos.update_price(Money::new(dec!(183)));
        assert_eq!(pos.units(), 150);
        assert_eq!(pos.pnl(), Money::new(dec!(4950)));
        assert_eq!(pos.pnl_percent(), dec!(22));
    }

    #[test]
    fn losses_are_negative() {
        let mut pos = OpenPosition::new(OptionKind::Put, plan(), 1, 75).unwrap();
        pos.update_price(Money::new(dec!(119)));
        assert_eq!(pos.pnl(), Money::new(dec!(-2325)));
        assert!(pos.pnl_percent() < dec!(-20));
    }

    #[test]
    fn rejects_empty_quantity() {
        assert!(OpenPosition::new(OptionKind::Call, plan(), 0, 75).is_err());
        assert!(OpenPosition::new(OptionKind::Call, plan(), 1, 0).is_err());
    }
}
