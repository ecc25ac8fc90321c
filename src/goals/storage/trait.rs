//! Goal store trait

use async_trait::async_trait;

use crate::goals::types::{Goal, NewGoal};
use crate::storage::StorageError;

/// Goal store
#[async_trait]
pub trait GoalStorage: Send + Sync {
    /// Insert a goal; the store assigns id and timestamps
    async fn insert(&self, goal: NewGoal) -> Result<Goal, StorageError>;

    /// Goals owned by `user_id`, oldest first
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>, StorageError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Goal>, StorageError>;

    /// Replace the text and bump `updated_at`.
    /// [`StorageError::NotFound`] if the goal is gone.
    async fn update_text(&self, id: &str, text: &str) -> Result<Goal, StorageError>;

    /// [`StorageError::NotFound`] if the goal is gone.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}
