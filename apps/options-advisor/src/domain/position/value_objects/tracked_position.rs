//! Watchlist entry with lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::open_position::OpenPosition;
use crate::domain::shared::{DomainError, Money, OptionContract, PositionId, UserId};

/// Lifecycle status of a watchlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PositionStatus {
    /// Being monitored.
    Active,
    /// Exited by the user.
    Closed {
        /// Premium at exit.
        exit_price: Money,
        /// Exit time.
        closed_at: DateTime<Utc>,
    },
}

/// A user's position as stored by the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedPosition {
    /// Opaque id.
    pub id: PositionId,
    /// Owner.
    pub user_id: UserId,
    /// Contract held.
    pub contract: OptionContract,
    /// Plan, size and latest price.
    pub position: OpenPosition,
    /// Implied volatility at entry, percent.
    #[serde(default)]
    pub entry_iv_percent: Option<f64>,
    /// Entry time.
    pub opened_at: DateTime<Utc>,
    /// Lifecycle status.
    #[serde(flatten)]
    pub status: PositionStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TrackedPosition {
    /// Start tracking a position under a fresh id.
    #[must_use]
    pub fn open(
        user_id: UserId,
        contract: OptionContract,
        position: OpenPosition,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PositionId::generate(),
            user_id,
            contract,
            position,
            entry_iv_percent: None,
            opened_at,
            status: PositionStatus::Active,
            notes: None,
        }
    }

    /// Whether the position is still monitored.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, PositionStatus::Active)
    }

    /// Mark the position closed at `exit_price`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStateTransition`] if already closed.
    pub fn close(
        &mut self,
        exit_price: Money,
        closed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::InvalidStateTransition {
                entity: format!("Position {}", self.id),
                from: "closed".to_string(),
                to: "closed".to_string(),
            });
        }
        self.position.update_price(exit_price);
        self.status = PositionStatus::Closed {
            exit_price,
            closed_at,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_plan::RiskPlan;
    use crate::pricing::OptionKind;
    use rust_decimal_macros::dec;

    fn tracked() -> TrackedPosition {
        let plan = RiskPlan::new(
            Money::new(dec!(150)),
            Money::new(dec!(120)),
            Money::new(dec!(180)),
            None,
        )
        .unwrap();
        TrackedPosition::open(
            UserId::new("u1"),
            OptionContract::new(
                "NIFTY",
                26_000.0,
                OptionKind::Call,
                "28-Nov-2025".parse().unwrap(),
            ),
            OpenPosition::new(OptionKind::Call, plan, 1, 75).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn close_once() {
        let mut pos = tracked();
        assert!(pos.is_active());

        pos.close(Money::new(dec!(170)), Utc::now()).unwrap();
        assert!(!pos.is_active());
        assert_eq!(pos.position.pnl(), Money::new(dec!(1500)));

        let err = pos.close(Money::new(dec!(171)), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
    }

    #[test]
    fn status_serializes_flat() {
        let json = serde_json::to_value(tracked()).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["contract"]["kind"], "CE");
    }
}
