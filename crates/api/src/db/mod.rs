//! Store layer: `PostgreSQL` access for every entity.
//!
//! Each entity gets a repository implementing its store trait from the
//! service layer (`UserStore`, `ProductStore`, `CartStore`, `OrderStore`).
//! Queries are runtime-checked (`query_as` + `FromRow`), so the crate builds
//! without a live database.
//!
//! # Tables
//!
//! - `users` - accounts (unique email)
//! - `products` - catalog (unique name)
//! - `carts` / `cart_items` - one cart per user, one row per line
//! - `orders` / `order_items` - placed orders with snapshotted lines
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p bramble-cli -- migrate
//! ```
//! They are never run automatically on server startup.

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

pub use carts::PgCarts;
pub use orders::PgOrders;
pub use products::PgProducts;
pub use users::PgUsers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors surfaced by the store layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email or product name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// Called once at startup; the pool is process-wide state and is closed on
/// shutdown, never reopened per request.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx error to [`RepositoryError::Conflict`] when it is a
/// unique-index violation, passing everything else through as a database
/// error. The unique index is the authoritative backstop for the
/// application-level duplicate checks.
pub(crate) fn map_unique_violation(err: sqlx::Error, conflict_msg: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict_msg.to_owned());
    }
    RepositoryError::Database(err)
}
