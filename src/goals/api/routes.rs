//! Goal routes

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use super::handlers;
use crate::api::state::AppState;
use crate::auth::require_auth;

/// `/api/goals` routes, all behind the bearer middleware
pub fn create_goal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route(
            "/api/goals/:id",
            put(handlers::update_goal).delete(handlers::delete_goal),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
