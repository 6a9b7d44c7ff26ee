//! Unified error handling for the request boundary.
//!
//! Provides the `ApiError` type that every route handler returns. Errors are
//! translated to the JSON response envelope here; nothing propagates past the
//! request boundary. Internal failures are logged with full detail and
//! replaced with a generic message so store internals never leak to clients.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or out-of-range input. Field-specific, first
    /// failure wins.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or invalid bearer credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The id did not resolve to a record.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication subsystem failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Anything else unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

/// The JSON response envelope for errors: `{"msg": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    msg: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::ExpiredToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Hash(_) | AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg.clone(),
            // Race backstop: the store's unique index fired after the
            // fast-path check passed.
            Self::Repository(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Repository(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
                AuthError::InvalidToken => "Invalid authentication token".to_owned(),
                AuthError::ExpiredToken => "Authentication token has expired".to_owned(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::Hash(_) | AuthError::Token(_) => "Internal server error".to_owned(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorEnvelope {
            msg: self.message(),
        });

        (status, body).into_response()
    }
}

// A body the extractor could not parse is a validation failure like any
// other; route it through the envelope instead of axum's plain-text reply.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
