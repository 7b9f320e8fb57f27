//! Authentication and authorization errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Gate failure. Every variant is terminal for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Access token required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Your account is pending approval. An administrator will review it shortly.")]
    PendingApproval,
    #[error("Failed to load user")]
    UserLoadError,
    #[error("Failed to issue token")]
    TokenIssueFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UserNotFound
            | AuthError::Unauthenticated
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden | AuthError::PendingApproval => StatusCode::FORBIDDEN,
            AuthError::UserLoadError | AuthError::TokenIssueFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::PendingApproval => "PENDING_APPROVAL",
            AuthError::UserLoadError => "USER_LOAD_ERROR",
            AuthError::TokenIssueFailed => "TOKEN_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": self.error_code(),
        }));

        (self.status_code(), body).into_response()
    }
}
