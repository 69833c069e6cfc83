//! Authentication and authorization errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No usable identity on a route that needs one
    #[error("Authentication required")]
    MissingAuthorization,
    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    /// Identity present but lacking the role or ownership the route needs
    #[error("Insufficient permissions for this resource")]
    Forbidden,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Failed to issue token")]
    TokenIssueFailed,
    #[error("Failed to process password")]
    PasswordHashFailed,
    #[error("Failed to load identity")]
    LookupFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::TokenIssueFailed
            | AuthError::PasswordHashFailed
            | AuthError::LookupFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthorization => "MISSING_AUTHORIZATION",
            AuthError::InvalidAuthorizationFormat => "INVALID_AUTHORIZATION",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenIssueFailed => "TOKEN_ISSUE_ERROR",
            AuthError::PasswordHashFailed => "PASSWORD_HASH_ERROR",
            AuthError::LookupFailed => "IDENTITY_LOOKUP_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<AuthError> for jobboard_common::Error {
    fn from(err: AuthError) -> Self {
        match err.status_code() {
            StatusCode::UNAUTHORIZED => jobboard_common::Error::Authentication(err.to_string()),
            StatusCode::FORBIDDEN => jobboard_common::Error::Authorization(err.to_string()),
            _ => jobboard_common::Error::Internal(err.to_string()),
        }
    }
}
