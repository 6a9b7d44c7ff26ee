//! Authentication primitives: password policy, hashing, bearer tokens.
//!
//! The token contract is `verify(credential) -> identity | failure`: a
//! signed, expiring HS256 token whose `sub` claim carries the user id.
//! Verification checks signature and expiry only; it never touches the
//! store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use bramble_core::UserId;

/// Password policy bounds.
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 20;

/// Characters accepted as the required special character.
const SPECIAL_CHARS: &str = "@.#$!%*?&";

/// Signing and verification keys, built once at startup from the configured
/// secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Build the key pair from a shared secret.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Bearer token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: i32,
    /// Expiration time as unix seconds.
    pub exp: i64,
}

/// Check a candidate password against the policy: 6-20 characters with at
/// least one lowercase letter, one uppercase letter, one digit, and one of
/// `@.#$!%*?&`.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` naming the first unmet requirement.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(AuthError::WeakPassword(format!(
            "Password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain a lowercase letter".to_owned(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain an uppercase letter".to_owned(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain a digit".to_owned(),
        ));
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(AuthError::WeakPassword(format!(
            "Password must contain one of {SPECIAL_CHARS}"
        )));
    }
    Ok(())
}

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch and
/// `AuthError::Hash` when the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Mint a bearer token for a user, expiring `ttl_hours` from `now`.
///
/// # Errors
///
/// Returns `AuthError::Token` if encoding fails.
pub fn issue_token(
    keys: &TokenKeys,
    user_id: UserId,
    now_unix: i64,
    ttl_hours: u64,
) -> Result<String, AuthError> {
    let ttl_secs = i64::try_from(ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
    let claims = Claims {
        sub: user_id.as_i32(),
        exp: now_unix.saturating_add(ttl_secs),
    };
    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &keys.encoding,
    )?)
}

/// Verify a bearer token and extract the caller identity.
///
/// # Errors
///
/// Returns `AuthError::ExpiredToken` when past expiry and
/// `AuthError::InvalidToken` for every other verification failure
/// (malformed, bad signature, wrong algorithm).
pub fn verify_token(keys: &TokenKeys, token: &str) -> Result<UserId, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    match jsonwebtoken::decode::<Claims>(token, &keys.decoding, &validation) {
        Ok(data) => Ok(UserId::new(data.claims.sub)),
        Err(err) => match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::ExpiredToken),
            _ => Err(AuthError::InvalidToken),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"qL8mB2vN5xR1tY7wK4jH9dF3gS6aZ0pC")
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Abc1@x").is_ok());
        assert!(validate_password("Str0ng@Pass").is_ok());

        // each missing requirement, first failure wins
        assert!(validate_password("Ab1@").is_err()); // too short
        assert!(validate_password("ABC123@DEF").is_err()); // no lowercase
        assert!(validate_password("abc123@def").is_err()); // no uppercase
        assert!(validate_password("Abcdef@ghi").is_err()); // no digit
        assert!(validate_password("Abcdef123").is_err()); // no special
        assert!(validate_password(&"Aa1@".repeat(8)).is_err()); // too long
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Str0ng@Pass").unwrap();
        assert!(verify_password("Str0ng@Pass", &hash).is_ok());
        assert!(matches!(
            verify_password("Wr0ng@Pass", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Str0ng@Pass").unwrap();
        let b = hash_password("Str0ng@Pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_roundtrip() {
        let keys = keys();
        let now = 1_700_000_000;
        let token = issue_token(&keys, UserId::new(42), now, 24).unwrap();
        // exp is in the future relative to real clock checks only if now is
        // recent; use a decode with validation disabled for the claim check
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data =
            jsonwebtoken::decode::<Claims>(&token, &keys.decoding, &validation).unwrap();
        assert_eq!(data.claims.sub, 42);
        assert_eq!(data.claims.exp, now + 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        // expired long ago
        let token = issue_token(&keys, UserId::new(1), 1_000_000, 1).unwrap();
        assert!(matches!(
            verify_token(&keys, &token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let keys = keys();
        assert!(matches!(
            verify_token(&keys, "not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(&keys(), UserId::new(1), 9_999_999_999, 1).unwrap();
        let other = TokenKeys::from_secret(b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz");
        assert!(matches!(
            verify_token(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }
}
