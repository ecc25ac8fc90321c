//! In-memory goal store

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::r#trait::GoalStorage;
use crate::goals::types::{Goal, NewGoal};
use crate::storage::StorageError;

/// In-memory goal store. Keeps insertion order.
#[derive(Clone, Default)]
pub struct MemoryGoalStorage {
    goals: Arc<RwLock<Vec<Goal>>>,
}

impl MemoryGoalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalStorage for MemoryGoalStorage {
    async fn insert(&self, goal: NewGoal) -> Result<Goal, StorageError> {
        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user: goal.user,
            text: goal.text,
            created_at: now,
            updated_at: now,
        };
        self.goals.write().await.push(goal.clone());
        Ok(goal)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>, StorageError> {
        let goals = self.goals.read().await;
        Ok(goals.iter().filter(|g| g.user == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Goal>, StorageError> {
        let goals = self.goals.read().await;
        Ok(goals.iter().find(|g| g.id == id).cloned())
    }

    async fn update_text(&self, id: &str, text: &str) -> Result<Goal, StorageError> {
        let mut goals = self.goals.write().await;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StorageError::NotFound)?;
        goal.text = text.to_string();
        goal.updated_at = Utc::now();
        Ok(goal.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut goals = self.goals.write().await;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_goal(user: &str, text: &str) -> NewGoal {
        NewGoal {
            user: user.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let storage = MemoryGoalStorage::new();
        let a = storage.insert(new_goal("u1", "first")).await.unwrap();
        let b = storage.insert(new_goal("u1", "second")).await.unwrap();
        storage.insert(new_goal("u2", "other")).await.unwrap();

        let mine = storage.list_for_user("u1").await.unwrap();
        assert_eq!(mine.iter().map(|g| g.id.as_str()).collect::<Vec<_>>(), [a.id.as_str(), b.id.as_str()]);

        let updated = storage.update_text(&a.id, "changed").await.unwrap();
        assert_eq!(updated.text, "changed");
        assert!(updated.updated_at >= updated.created_at);

        storage.delete(&a.id).await.unwrap();
        assert!(storage.find_by_id(&a.id).await.unwrap().is_none());
        assert!(matches!(storage.delete(&a.id).await, Err(StorageError::NotFound)));
        assert!(matches!(
            storage.update_text(&a.id, "x").await,
            Err(StorageError::NotFound)
        ));
    }
}
