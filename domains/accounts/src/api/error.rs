//! Handler error type for the Accounts domain

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use venturesroom_auth::AuthError;
use venturesroom_common::{Error, RepositoryError, StateError};

/// Standard API error type
#[derive(Debug)]
pub enum ApiError {
    /// Gate or credential failure
    Auth(AuthError),
    /// Application error (validation, not found, storage, ...)
    App(Error),
    /// Registration with an email that already has an account
    DuplicateEmail,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => e.into_response(),
            ApiError::App(e) => e.into_response(),
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "User already exists with this email",
                    "code": "DUPLICATE_EMAIL",
                })),
            )
                .into_response(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Auth(error)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::App(error)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::AlreadyExists => ApiError::DuplicateEmail,
            other => ApiError::App(other.into()),
        }
    }
}

impl From<StateError> for ApiError {
    fn from(error: StateError) -> Self {
        ApiError::App(error.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::App(error.into())
    }
}

/// Result type for accounts handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
