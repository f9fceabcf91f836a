//! Close Position Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{PositionRepositoryPort, RepositoryError};
use crate::domain::position::TrackedPosition;
use crate::domain::shared::{Money, PositionId, UserId};
use crate::error::AdvisorError;

/// Use case for closing a watchlist position on the user's behalf.
pub struct ClosePositionUseCase<R>
where
    R: PositionRepositoryPort,
{
    positions: Arc<R>,
}

impl<R> ClosePositionUseCase<R>
where
    R: PositionRepositoryPort,
{
    /// Create a new `ClosePositionUseCase`.
    pub const fn new(positions: Arc<R>) -> Self {
        Self { positions }
    }

    /// Close `id` at `exit_price` if it belongs to `user_id`.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        id: &PositionId,
        user_id: &UserId,
        exit_price: Money,
        closed_at: DateTime<Utc>,
    ) -> Result<TrackedPosition, AdvisorError> {
        let position = self
            .positions
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;

        if &position.user_id != user_id {
            return Err(RepositoryError::NotOwner {
                id: id.to_string(),
                user_id: user_id.to_string(),
            }
            .into());
        }

        let closed = self.positions.close(id, exit_price, closed_at).await?;
        tracing::info!(
            position_id = %id,
            %exit_price,
            pnl = %closed.position.pnl(),
            "Position closed"
        );
        Ok(closed)
    }
}
