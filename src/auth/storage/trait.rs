//! User store trait

use async_trait::async_trait;

use crate::auth::types::{NewUser, UserRecord};
use crate::storage::StorageError;

/// User store
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a user unless the email is taken.
    ///
    /// Returns [`StorageError::Duplicate`] when another user already holds
    /// the email, including when a concurrent insert won the race.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StorageError>;

    /// Find a user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StorageError>;
}
