//! State shared by every route

use axum::extract::FromRef;
use std::sync::Arc;

use crate::auth::{core::TokenService, storage::UserStorage, AuthError, AuthService};
use crate::config::AppConfig;
use crate::goals::{GoalService, GoalStorage};

/// Router state. Handlers extract the piece they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub goals: Arc<GoalService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the services over the given stores.
    ///
    /// # Errors
    /// [`AuthError::Config`] if the signing secret is unusable.
    pub fn new(
        users: Arc<dyn UserStorage>,
        goals: Arc<dyn GoalStorage>,
        config: &AppConfig,
    ) -> Result<Self, AuthError> {
        let auth = Arc::new(AuthService::from_config(users, config)?);
        Ok(Self {
            tokens: auth.tokens(),
            auth,
            goals: Arc::new(GoalService::new(goals)),
        })
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.auth)
    }
}

impl FromRef<AppState> for Arc<GoalService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.goals)
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.tokens)
    }
}
