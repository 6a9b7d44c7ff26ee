//! CLI subcommands.

pub mod migrate;
pub mod seed;

/// Errors shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Read the database URL from the environment.
pub fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("BRAMBLE_DATABASE_URL")
        .map_err(|_| CommandError::MissingEnvVar("BRAMBLE_DATABASE_URL"))
}
