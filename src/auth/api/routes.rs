//! Auth routes

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::{handlers, require_auth};
use crate::api::state::AppState;

/// Register, login and current-user routes
pub fn create_auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/users/me", get(handlers::get_me))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/api/users", post(handlers::register))
        .route("/api/users/login", post(handlers::login))
        .merge(protected)
}
