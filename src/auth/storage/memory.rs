//! In-memory user store (development and tests)

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::r#trait::UserStorage;
use crate::auth::types::{NewUser, UserRecord};
use crate::storage::StorageError;

#[derive(Default)]
struct Tables {
    /// id -> user
    users: HashMap<String, UserRecord>,
    /// email -> id
    email_index: HashMap<String, String>,
}

/// In-memory user store.
///
/// Both maps sit behind one lock so the uniqueness check and the insert
/// happen in the same critical section.
#[derive(Clone, Default)]
pub struct MemoryUserStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryUserStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StorageError> {
        let mut tables = self.tables.write().await;

        if tables.email_index.contains_key(&user.email) {
            return Err(StorageError::Duplicate("users.email".to_string()));
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: chrono::Utc::now(),
        };

        tables
            .email_index
            .insert(record.email.clone(), record.id.clone());
        tables.users.insert(record.id.clone(), record.clone());

        debug!("user saved to memory store: id={}", record.id);
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}
