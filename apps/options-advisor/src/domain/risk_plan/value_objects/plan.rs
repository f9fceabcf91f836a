//! Stop-loss and target levels.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money};

/// Entry, stop loss and targets for a long option.
///
/// Construction only checks that every level is positive; ordering problems
/// are reported by the validator, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPlan {
    /// Entry premium.
    pub entry: Money,
    /// Exit below this.
    pub stop_loss: Money,
    /// First profit target.
    pub target1: Money,
    /// Optional second profit target.
    pub target2: Option<Money>,
}

impl RiskPlan {
    /// Create a plan with positive levels.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] when any level is zero or negative.
    pub fn new(
        entry: Money,
        stop_loss: Money,
        target1: Money,
        target2: Option<Money>,
    ) -> Result<Self, DomainError> {
        for (field, level) in [
            ("entry", Some(entry)),
            ("stop_loss", Some(stop_loss)),
            ("target1", Some(target1)),
            ("target2", target2),
        ] {
            if let Some(level) = level
                && !level.is_positive()
            {
                return Err(DomainError::invalid(
                    field,
                    format!("must be positive, got {level}"),
                ));
            }
        }

        Ok(Self {
            entry,
            stop_loss,
            target1,
            target2,
        })
    }

    /// `stop_loss < entry < target1 <= target2`.
    #[must_use]
    pub fn is_well_ordered(&self) -> bool {
        self.stop_loss < self.entry
            && self.entry < self.target1
            && self.target2.is_none_or(|t2| self.target1 <= t2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(v: rust_decimal::Decimal) -> Money {
        Money::new(v)
    }

    #[test]
    fn rejects_non_positive_levels() {
        let err = RiskPlan::new(money(dec!(0)), money(dec!(1)), money(dec!(2)), None).unwrap_err();
        assert!(err.to_string().contains("entry"));

        let err = RiskPlan::new(
            money(dec!(150)),
            money(dec!(120)),
            money(dec!(180)),
            Some(money(dec!(-1))),
        )
        .unwrap_err();
        assert!(err.to_string().contains("target2"));
    }

    #[test]
    fn ordering_check() {
        let plan = RiskPlan::new(
            money(dec!(150)),
            money(dec!(120)),
            money(dec!(180)),
            Some(money(dec!(210))),
        )
        .unwrap();
        assert!(plan.is_well_ordered());

        let inverted = RiskPlan {
            stop_loss: money(dec!(160)),
            ..plan
        };
        assert!(!inverted.is_well_ordered());
    }
}
