//! Position Repository Port (Driven Port)
//!
//! Interface for persisting the user's watchlist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::position::TrackedPosition;
use crate::domain::shared::{DomainError, Money, PositionId, UserId};

/// Repository error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// No position with this id.
    #[error("Position not found: {id}")]
    NotFound {
        /// The id looked up.
        id: String,
    },

    /// The position belongs to another user.
    #[error("Position {id} does not belong to user {user_id}")]
    NotOwner {
        /// Position id.
        id: String,
        /// Requesting user.
        user_id: String,
    },

    /// The domain rejected the change.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Backing store failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Error details.
        message: String,
    },
}

/// Port for watchlist persistence.
#[async_trait]
pub trait PositionRepositoryPort: Send + Sync {
    /// Insert or replace a position.
    async fn save(&self, position: &TrackedPosition) -> Result<(), RepositoryError>;

    /// Find a position by id.
    async fn find_by_id(&self, id: &PositionId) -> Result<Option<TrackedPosition>, RepositoryError>;

    /// Active positions of a user, oldest first.
    async fn active_for_user(&self, user_id: &UserId)
    -> Result<Vec<TrackedPosition>, RepositoryError>;

    /// Mark a position closed and return it.
    async fn close(
        &self,
        id: &PositionId,
        exit_price: Money,
        closed_at: DateTime<Utc>,
    ) -> Result<TrackedPosition, RepositoryError>;

    /// Delete a position owned by `user_id`.
    async fn delete(&self, id: &PositionId, user_id: &UserId) -> Result<(), RepositoryError>;
}
