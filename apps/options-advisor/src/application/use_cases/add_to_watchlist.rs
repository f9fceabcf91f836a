//! Add To Watchlist Use Case
//!
//! Opens a tracked position. Missing stop loss or target levels are filled
//! from the auto-sizer; user-supplied levels are validated and the warnings
//! returned alongside the stored position.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::PositionRepositoryPort;
use crate::domain::position::{OpenPosition, TrackedPosition};
use crate::domain::risk_plan::{RiskAssessment, RiskPlan, RiskValidator};
use crate::domain::shared::{Money, OptionContract, Symbol, UserId};
use crate::error::AdvisorError;
use crate::pricing::Greeks;

/// A new watchlist entry as submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToWatchlistRequest {
    /// Owner.
    pub user_id: UserId,
    /// Contract bought.
    pub contract: OptionContract,
    /// Entry premium.
    pub entry: Money,
    /// Stop loss; auto-sized when absent.
    #[serde(default)]
    pub stop_loss: Option<Money>,
    /// First target; auto-sized when absent.
    #[serde(default)]
    pub target1: Option<Money>,
    /// Second target.
    #[serde(default)]
    pub target2: Option<Money>,
    /// Number of lots.
    pub lots: u32,
    /// Implied volatility at entry, percent.
    #[serde(default)]
    pub entry_iv_percent: Option<f64>,
    /// Greeks at entry.
    #[serde(default)]
    pub entry_greeks: Option<Greeks>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Entry time.
    pub opened_at: DateTime<Utc>,
}

/// Result of adding a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistAddition {
    /// The stored position.
    pub position: TrackedPosition,
    /// Validation of user-supplied levels; `None` when fully auto-sized.
    pub assessment: Option<RiskAssessment>,
    /// Whether both stop loss and target came from the auto-sizer.
    pub auto_sized: bool,
}

/// Use case for adding a position to the watchlist.
pub struct AddToWatchlistUseCase<R>
where
    R: PositionRepositoryPort,
{
    positions: Arc<R>,
    validator: RiskValidator,
    lot_sizes: HashMap<Symbol, u32>,
}

impl<R> AddToWatchlistUseCase<R>
where
    R: PositionRepositoryPort,
{
    /// Create a new `AddToWatchlistUseCase`.
    pub const fn new(
        positions: Arc<R>,
        validator: RiskValidator,
        lot_sizes: HashMap<Symbol, u32>,
    ) -> Self {
        Self {
            positions,
            validator,
            lot_sizes,
        }
    }

    /// Execute the use case.
    #[tracing::instrument(skip_all, fields(user_id = %request.user_id, contract = %request.contract))]
    pub async fn execute(
        &self,
        request: AddToWatchlistRequest,
    ) -> Result<WatchlistAddition, AdvisorError> {
        let symbol = &request.contract.symbol;
        let lot_size = *self
            .lot_sizes
            .get(symbol)
            .ok_or_else(|| AdvisorError::UnknownInstrument {
                symbol: symbol.to_string(),
            })?;

        // 1. Complete the plan
        let auto_sized = request.stop_loss.is_none() && request.target1.is_none();
        let sized = self.validator.auto_size(request.entry);
        let plan = RiskPlan::new(
            request.entry,
            request.stop_loss.unwrap_or(sized.stop_loss),
            request.target1.unwrap_or(sized.target1),
            request
                .target2
                .or_else(|| sized.target2.filter(|_| auto_sized)),
        )?;

        // 2. Validate user levels
        let assessment = (!auto_sized).then(|| self.validator.validate_plan(&plan));
        if let Some(a) = assessment.as_ref().filter(|a| !a.is_clean()) {
            tracing::info!(warnings = ?a.messages(), "Plan accepted with warnings");
        }

        // 3. Store
        let mut open = OpenPosition::new(request.contract.kind, plan, request.lots, lot_size)?;
        if let Some(greeks) = request.entry_greeks {
            open = open.with_entry_greeks(greeks);
        }
        let mut tracked =
            TrackedPosition::open(request.user_id, request.contract, open, request.opened_at);
        tracked.entry_iv_percent = request.entry_iv_percent;
        tracked.notes = request.notes;

        self.positions.save(&tracked).await?;
        tracing::debug!(position_id = %tracked.id, auto_sized, "Position added to watchlist");

        Ok(WatchlistAddition {
            position: tracked,
            assessment,
            auto_sized,
        })
    }
}
