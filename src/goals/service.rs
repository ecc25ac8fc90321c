//! Goal service: presence and ownership rules over a [`GoalStorage`]

use std::sync::Arc;
use tracing::info;

use crate::goals::{
    errors::GoalError,
    storage::GoalStorage,
    types::{DeletedGoal, Goal, GoalRequest, NewGoal},
};

pub struct GoalService {
    goals: Arc<dyn GoalStorage>,
}

impl GoalService {
    pub fn new(goals: Arc<dyn GoalStorage>) -> Self {
        Self { goals }
    }

    /// The caller's goals, oldest first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Goal>, GoalError> {
        Ok(self.goals.list_for_user(user_id).await?)
    }

    pub async fn create(&self, user_id: &str, req: GoalRequest) -> Result<Goal, GoalError> {
        let text = required_text(req)?;
        let goal = self
            .goals
            .insert(NewGoal {
                user: user_id.to_string(),
                text,
            })
            .await?;

        info!("goal created: id={} user={}", goal.id, user_id);
        Ok(goal)
    }

    pub async fn update(
        &self,
        user_id: &str,
        goal_id: &str,
        req: GoalRequest,
    ) -> Result<Goal, GoalError> {
        self.owned(user_id, goal_id).await?;
        let text = required_text(req)?;
        Ok(self.goals.update_text(goal_id, &text).await?)
    }

    pub async fn delete(&self, user_id: &str, goal_id: &str) -> Result<DeletedGoal, GoalError> {
        self.owned(user_id, goal_id).await?;
        self.goals.delete(goal_id).await?;

        info!("goal deleted: id={} user={}", goal_id, user_id);
        Ok(DeletedGoal {
            id: goal_id.to_string(),
        })
    }

    async fn owned(&self, user_id: &str, goal_id: &str) -> Result<Goal, GoalError> {
        let goal = self
            .goals
            .find_by_id(goal_id)
            .await?
            .ok_or(GoalError::NotFound)?;

        if goal.user != user_id {
            return Err(GoalError::NotOwner);
        }
        Ok(goal)
    }
}

fn required_text(req: GoalRequest) -> Result<String, GoalError> {
    req.text
        .filter(|t| !t.trim().is_empty())
        .ok_or(GoalError::MissingText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::storage::MemoryGoalStorage;

    fn service() -> GoalService {
        GoalService::new(Arc::new(MemoryGoalStorage::new()))
    }

    fn text(t: &str) -> GoalRequest {
        GoalRequest {
            text: Some(t.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_to_owner() {
        let service = service();
        service.create("ann", text("run")).await.unwrap();
        service.create("bob", text("swim")).await.unwrap();

        let anns = service.list("ann").await.unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].text, "run");
        assert_eq!(anns[0].user, "ann");
    }

    #[tokio::test]
    async fn test_create_requires_text() {
        let service = service();
        assert!(matches!(
            service.create("ann", GoalRequest::default()).await,
            Err(GoalError::MissingText)
        ));
        assert!(matches!(
            service.create("ann", text("  ")).await,
            Err(GoalError::MissingText)
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_enforce_ownership() {
        let service = service();
        let goal = service.create("ann", text("run")).await.unwrap();

        assert!(matches!(
            service.update("bob", &goal.id, text("hijack")).await,
            Err(GoalError::NotOwner)
        ));
        assert!(matches!(
            service.delete("bob", &goal.id).await,
            Err(GoalError::NotOwner)
        ));

        let updated = service.update("ann", &goal.id, text("run faster")).await.unwrap();
        assert_eq!(updated.text, "run faster");

        let deleted = service.delete("ann", &goal.id).await.unwrap();
        assert_eq!(deleted.id, goal.id);
        assert!(service.list("ann").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_goal() {
        let service = service();
        assert!(matches!(
            service.update("ann", "nope", text("x")).await,
            Err(GoalError::NotFound)
        ));
        assert!(matches!(service.delete("ann", "nope").await, Err(GoalError::NotFound)));
    }
}
