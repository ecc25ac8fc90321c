//! Bearer-token middleware
//!
//! Verifies `Authorization: Bearer <token>` and attaches the resolved
//! [`AuthenticatedUser`] to the request before protected handlers run.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{core::TokenService, errors::AuthError, types::AuthenticatedUser};

/// Reject requests without a valid bearer token.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(request.headers())?;

    let user_id = tokens.verify_token(token).map_err(|e| {
        debug!("bearer token rejected: {}", e);
        e
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { id: user_id });

    Ok(next.run(request).await)
}

/// Token from the `Authorization` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}
