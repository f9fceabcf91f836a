//! In-memory watchlist repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{PositionRepositoryPort, RepositoryError};
use crate::domain::position::TrackedPosition;
use crate::domain::shared::{Money, PositionId, UserId};

/// In-memory implementation of [`PositionRepositoryPort`].
///
/// Suitable for tests and the snapshot binary. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryPositionRepository {
    positions: RwLock<HashMap<PositionId, TrackedPosition>>,
}

impl InMemoryPositionRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored positions, active or closed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PositionRepositoryPort for InMemoryPositionRepository {
    async fn save(&self, position: &TrackedPosition) -> Result<(), RepositoryError> {
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(position.id.clone(), position.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PositionId,
    ) -> Result<Option<TrackedPosition>, RepositoryError> {
        let positions = self.positions.read().unwrap_or_else(PoisonError::into_inner);
        Ok(positions.get(id).cloned())
    }

    async fn active_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TrackedPosition>, RepositoryError> {
        let mut active: Vec<TrackedPosition> = {
            let positions = self.positions.read().unwrap_or_else(PoisonError::into_inner);
            positions
                .values()
                .filter(|p| &p.user_id == user_id && p.is_active())
                .cloned()
                .collect()
        };
        active.sort_by_key(|p| p.opened_at);
        Ok(active)
    }

    async fn close(
        &self,
        id: &PositionId,
        exit_price: Money,
        closed_at: DateTime<Utc>,
    ) -> Result<TrackedPosition, RepositoryError> {
        let mut positions = self.positions.write().unwrap_or_else(PoisonError::into_inner);
        let position = positions
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
        position.close(exit_price, closed_at)?;
        Ok(position.clone())
    }

    async fn delete(&self, id: &PositionId, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut positions = self.positions.write().unwrap_or_else(PoisonError::into_inner);
        match positions.get(id) {
            None => Err(RepositoryError::NotFound { id: id.to_string() }),
            Some(p) if &p.user_id != user_id => Err(RepositoryError::NotOwner {
                id: id.to_string(),
                user_id: user_id.to_string(),
            }),
            Some(_) => {
                positions.remove(id);
                Ok(())
            }
        }
    }
}
