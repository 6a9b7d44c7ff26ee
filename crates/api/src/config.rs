//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BRAMBLE_DATABASE_URL` - `PostgreSQL` connection string
//! - `BRAMBLE_TOKEN_SECRET` - Bearer-token signing secret (min 32 chars,
//!   placeholder values rejected)
//!
//! ## Optional
//! - `BRAMBLE_HOST` - Bind address (default: 127.0.0.1)
//! - `BRAMBLE_PORT` - Listen port (default: 4000)
//! - `BRAMBLE_TOKEN_TTL_HOURS` - Token lifetime in hours (default: 24)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "insert",
];

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar {
        /// The variable name.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// `PostgreSQL` connection string.
    pub database_url: SecretString,
    /// Bearer-token signing secret.
    pub token_secret: SecretString,
    /// Token lifetime in hours.
    pub token_ttl_hours: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails validation. Secret validation happens here so a
    /// misconfigured deployment fails at startup, not on the first login.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("BRAMBLE_DATABASE_URL")?;
        let token_secret = require("BRAMBLE_TOKEN_SECRET")?;
        validate_token_secret(&token_secret)?;

        let host = optional("BRAMBLE_HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |v| {
                v.parse().map_err(|_| ConfigError::InvalidVar {
                    var: "BRAMBLE_HOST",
                    reason: format!("not an IP address: {v}"),
                })
            })?;

        let port = optional("BRAMBLE_PORT").map_or(Ok(4000), |v| {
            v.parse().map_err(|_| ConfigError::InvalidVar {
                var: "BRAMBLE_PORT",
                reason: format!("not a port number: {v}"),
            })
        })?;

        let token_ttl_hours = optional("BRAMBLE_TOKEN_TTL_HOURS").map_or(Ok(24), |v| {
            match v.parse::<u64>() {
                Ok(hours) if hours > 0 => Ok(hours),
                _ => Err(ConfigError::InvalidVar {
                    var: "BRAMBLE_TOKEN_TTL_HOURS",
                    reason: format!("not a positive hour count: {v}"),
                }),
            }
        })?;

        Ok(Self {
            host,
            port,
            database_url: SecretString::from(database_url),
            token_secret: SecretString::from(token_secret),
            token_ttl_hours,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The token secret as bytes, for key construction.
    #[must_use]
    pub fn token_secret_bytes(&self) -> &[u8] {
        self.token_secret.expose_secret().as_bytes()
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

fn optional(var: &'static str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn validate_token_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InvalidVar {
            var: "BRAMBLE_TOKEN_SECRET",
            reason: format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
        });
    }

    let lowered = secret.to_lowercase();
    if PLACEHOLDER_PATTERNS.iter().any(|p| lowered.contains(p)) {
        return Err(ConfigError::InvalidVar {
            var: "BRAMBLE_TOKEN_SECRET",
            reason: "looks like a placeholder value".to_owned(),
        });
    }

    Ok(())
}
