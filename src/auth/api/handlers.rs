//! Auth request handlers

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{errors::AuthError, types::*, AuthService};

/// `POST /api/users`
pub async fn register(
    State(service): State<Arc<AuthService>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let Json(req) = body?;
    debug!("API: register request: email={:?}", req.email);
    let response = service.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/users/login`
pub async fn login(
    State(service): State<Arc<AuthService>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let Json(req) = body?;
    debug!("API: login request: email={:?}", req.email);
    let response = service.login(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/users/me` (behind `require_auth`)
pub async fn get_me(
    State(service): State<Arc<AuthService>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfile>, AuthError> {
    let profile = service.current_user(&user.id).await?;
    Ok(Json(profile))
}
