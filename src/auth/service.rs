//! Authentication service
//!
//! Orchestrates registration, login and current-user lookup. Holds no
//! per-request state; the user store is the single source of truth.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{
    core::{PasswordService, TokenService},
    errors::{AuthError, INVALID_USER_DATA, MISSING_FIELDS},
    storage::UserStorage,
    types::*,
};
use crate::config::AppConfig;
use crate::storage::StorageError;

/// Authentication service
pub struct AuthService {
    users: Arc<dyn UserStorage>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStorage>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Build the service and its token issuer from config.
    ///
    /// # Errors
    /// [`AuthError::Config`] if the signing secret is unusable.
    pub fn from_config(users: Arc<dyn UserStorage>, config: &AppConfig) -> Result<Self, AuthError> {
        let tokens = Arc::new(TokenService::from_config(config)?);
        Ok(Self::new(users, PasswordService::new(config.bcrypt_cost), tokens))
    }

    /// Token issuer shared with the bearer middleware
    pub fn tokens(&self) -> Arc<TokenService> {
        Arc::clone(&self.tokens)
    }

    /// Register a new user and issue a token for it.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        // 1. presence
        let (name, email, password) = match (
            present(req.name),
            present(req.email),
            present(req.password),
        ) {
            (Some(name), Some(email), Some(password)) => (name, email, password),
            _ => return Err(AuthError::Validation(MISSING_FIELDS.to_string())),
        };

        // 2. fast-path uniqueness; the insert below is authoritative
        if self.users.find_by_email(&email).await?.is_some() {
            debug!("registration rejected, email taken: {}", email);
            return Err(AuthError::UserExists);
        }

        // 3. hash off the async workers
        let password_hash = self.hash(password).await?;

        // 4. insert-if-absent
        let user = self
            .users
            .insert(NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StorageError::Duplicate(_) => AuthError::UserExists,
                other => {
                    warn!("user insert failed: {}", other);
                    AuthError::Validation(INVALID_USER_DATA.to_string())
                }
            })?;

        // 5. token
        let token = self.tokens.generate_token(&user.id)?;

        info!("user registered: id={}", user.id);
        Ok(AuthResponse::new(&user, token))
    }

    /// Authenticate by email and password.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        let email = req.email.unwrap_or_default();
        let password = req.password.unwrap_or_default();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("login failed, unknown email: {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.verify(password, user.password_hash.clone()).await? {
            debug!("login failed, bad password: id={}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate_token(&user.id)?;

        info!("user logged in: id={}", user.id);
        Ok(AuthResponse::new(&user, token))
    }

    /// Profile of the user a verified token resolved to.
    pub async fn current_user(&self, user_id: &str) -> Result<UserProfile, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .as_ref()
            .map(UserProfile::from)
            .ok_or(AuthError::UserNotFound)
    }

    async fn hash(&self, password: String) -> Result<String, AuthError> {
        let passwords = self.passwords;
        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let passwords = self.passwords;
        tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {}", e)))
    }
}

/// `Some` only for a value that is not blank
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
