//! Goal error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Goal error
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Missing goal text")]
    MissingText,

    #[error("Goal not found")]
    NotFound,

    /// The goal belongs to someone else
    #[error("User not authorized")]
    NotOwner,

    /// The token's subject has no user row
    #[error("Unknown user")]
    UnknownUser,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl GoalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingText => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotOwner | Self::UnknownUser => StatusCode::UNAUTHORIZED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingText => "validation_error",
            Self::NotFound => "not_found",
            Self::NotOwner => "not_owner",
            Self::UnknownUser => "unauthorized",
            Self::Storage(_) => "storage_error",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingText => "Please add a text field",
            Self::NotFound => "Goal not found",
            Self::NotOwner => "User not authorized",
            Self::UnknownUser => "Not authorized",
            Self::Storage(_) => "Something went wrong, please try again",
        }
    }
}

impl From<StorageError> for GoalError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            StorageError::MissingReference(_) => Self::UnknownUser,
            other => Self::Storage(other.to_string()),
        }
    }
}

/// An unreadable body counts as one without text.
impl From<JsonRejection> for GoalError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected goal body: {}", rejection.body_text());
        Self::MissingText
    }
}

impl IntoResponse for GoalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "goal request failed");
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
    fn test_status_codes() {
        assert_eq!(GoalError::MissingText.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GoalError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GoalError::NotOwner.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_not_found_maps_to_not_found() {
        assert!(matches!(GoalError::from(StorageError::NotFound), GoalError::NotFound));
        assert!(matches!(
            GoalError::from(StorageError::Backend("x".to_string())),
            GoalError::Storage(_)
        ));
    }

    #[test]
    fn test_dangling_owner_is_unauthorized() {
        let err = GoalError::from(StorageError::MissingReference("FOREIGN KEY".to_string()));
        assert!(matches!(err, GoalError::UnknownUser));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(!err.user_message().contains("FOREIGN"));
    }
}
