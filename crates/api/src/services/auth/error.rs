//! Authentication error types.

use thiserror::Error;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination is wrong. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password does not meet the policy.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Bearer token failed signature or structural verification.
    #[error("invalid token")]
    InvalidToken,

    /// Bearer token is past its expiry.
    #[error("expired token")]
    ExpiredToken,

    /// Password hashing failed (internal).
    #[error("password hashing error: {0}")]
    Hash(String),

    /// Token minting failed (internal).
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
