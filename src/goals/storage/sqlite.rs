//! SQLite goal store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, FromRow};
use uuid::Uuid;

use super::r#trait::GoalStorage;
use crate::goals::types::{Goal, NewGoal};
use crate::storage::StorageError;

#[derive(FromRow)]
struct GoalRow {
    id: String,
    user_id: String,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// SQLite-backed goal store
#[derive(Clone)]
pub struct SqliteGoalStorage {
    pool: SqlitePool,
}

impl SqliteGoalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GoalStorage for SqliteGoalStorage {
    async fn insert(&self, goal: NewGoal) -> Result<Goal, StorageError> {
        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user: goal.user,
            text: goal.text,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO goals (id, user_id, text, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&goal.id)
        .bind(&goal.user)
        .bind(&goal.text)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(goal)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>, StorageError> {
        let rows = sqlx::query_as::<_, GoalRow>(
            "SELECT id, user_id, text, created_at, updated_at FROM goals \
             WHERE user_id = ? ORDER BY created_at, rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Goal>, StorageError> {
        let row = sqlx::query_as::<_, GoalRow>(
            "SELECT id, user_id, text, created_at, updated_at FROM goals WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Goal::from))
    }

    async fn update_text(&self, id: &str, text: &str) -> Result<Goal, StorageError> {
        let row = sqlx::query_as::<_, GoalRow>(
            "UPDATE goals SET text = ?, updated_at = ? WHERE id = ? \
             RETURNING id, user_id, text, created_at, updated_at",
        )
        .bind(text)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
