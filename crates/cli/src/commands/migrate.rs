//! Database migration command.

use sqlx::PgPool;

use super::{CommandError, database_url};

/// Run all pending migrations from `crates/api/migrations/`.
///
/// # Errors
///
/// Returns [`CommandError`] when the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
