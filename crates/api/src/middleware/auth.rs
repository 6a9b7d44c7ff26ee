//! Bearer-token auth guard.
//!
//! `RequireAuth` is a precondition gate: it verifies the credential carried
//! in the `Authorization` header and yields the caller identity. A missing,
//! malformed, expired, or forged token short-circuits with 401 before any
//! controller logic or store access runs. The guard never mutates persisted
//! state.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use bramble_core::UserId;

use crate::error::ApiError;
use crate::services::auth;
use crate::state::AppState;

/// The authenticated caller, resolved from the token's `sub` claim.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The caller's user id.
    pub id: UserId,
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(caller): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("hello, user {}", caller.id)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("Authentication token is required".to_owned())
            })?;

        let token = strip_bearer(header).ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be 'Bearer <token>'".to_owned())
        })?;

        let id = auth::verify_token(state.token_keys(), token)?;

        Ok(Self(AuthUser { id }))
    }
}

/// Pull the token out of a `Bearer <token>` header value. The scheme is
/// matched case-insensitively per RFC 7235.
fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim();
    if token.is_empty() { None } else { Some(token) }
}
