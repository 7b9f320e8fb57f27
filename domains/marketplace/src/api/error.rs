//! Handler error type for the Marketplace domain

use axum::response::{IntoResponse, Response};
use venturesroom_auth::AuthError;
use venturesroom_common::{Error, RepositoryError, StateError};

/// Either a gate rejection or an application error
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    App(Error),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::App(Error::NotFound(format!("{what} not found")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => e.into_response(),
            ApiError::App(e) => e.into_response(),
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
        ApiError::App(error.into())
    }
}

impl From<StateError> for ApiError {
    fn from(error: StateError) -> Self {
        ApiError::App(error.into())
    }
}

/// Result type for marketplace handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
