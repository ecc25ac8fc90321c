//! Authentication error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Message for a register request with a blank or absent field
pub const MISSING_FIELDS: &str = "Please add all fields";

/// Message for a rejected user insert
pub const INVALID_USER_DATA: &str = "Invalid user data";

/// Authentication error
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already exists")]
    UserExists,

    /// Shared by unknown email and wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    /// Token subject no longer resolves to a user
    #[error("User not found")]
    UserNotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UserExists | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }

            Self::MissingToken
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::MalformedToken
            | Self::UserNotFound => StatusCode::UNAUTHORIZED,

            Self::Config(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::UserExists => "user_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Config(_) => "config_error",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
            Self::MalformedToken => "malformed_token",
            Self::UserNotFound => "unauthorized",
            Self::Storage(_) => "storage_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// Message safe to hand to the client
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::UserExists => "User already exists",
            Self::InvalidCredentials => "Invalid email or password",
            Self::Config(_) => "Server misconfigured",
            Self::MissingToken => "Not authorized, no token",
            Self::TokenExpired => "Not authorized, token expired",
            Self::InvalidToken | Self::MalformedToken | Self::UserNotFound => "Not authorized",
            Self::Storage(_) | Self::Internal(_) => "Something went wrong, please try again",
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(_) => Self::UserExists,
            other => Self::Storage(other.to_string()),
        }
    }
}

/// An unreadable body counts as one with missing fields.
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected request body: {}", rejection.body_text());
        Self::Validation(MISSING_FIELDS.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "code": self.error_code(),
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AuthError::Validation(MISSING_FIELDS.to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::UserExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Storage("disk".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::UserExists.user_message(), "User already exists");
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::Validation(MISSING_FIELDS.to_string()).user_message(),
            "Please add all fields"
        );
    }

    #[test]
    fn test_internal_details_stay_out_of_message() {
        let err = AuthError::Storage("UNIQUE constraint failed: users.email".to_string());
        assert!(!err.user_message().contains("UNIQUE"));

        let err = AuthError::Config("JWT_SECRET".to_string());
        assert!(!err.user_message().contains("JWT_SECRET"));
    }

    #[test]
    fn test_duplicate_storage_error_maps_to_conflict() {
        let err: AuthError = StorageError::Duplicate("email".to_string()).into();
        assert!(matches!(err, AuthError::UserExists));

        let err: AuthError = StorageError::Backend("closed".to_string()).into();
        assert!(matches!(err, AuthError::Storage(_)));
    }
}
