//! User repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use bramble_core::{Email, Gender, UserId};

use super::{RepositoryError, map_unique_violation};
use crate::models::{NewUser, User, UserPatch};
use crate::services::users::UserStore;

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, gender, created_at, updated_at";

/// Postgres-backed user store.
pub struct PgUsers<'a> {
    pool: &'a PgPool,
}

impl<'a> PgUsers<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUsers<'_> {
    async fn find(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_gender(&self, gender: Gender) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE gender = $1 ORDER BY id"
        ))
        .bind(gender)
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    async fn find_one_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, phone, gender)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.phone)
        .bind(new.gender)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email already registered"))
    }

    async fn find_by_id_and_update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        // COALESCE keeps the stored value wherever the patch carries NULL,
        // giving partial-merge semantics in one statement.
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 password_hash = COALESCE($4, password_hash),
                 phone = COALESCE($5, phone),
                 gender = COALESCE($6, gender),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.password_hash)
        .bind(patch.phone)
        .bind(patch.gender)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email already registered"))
    }

    async fn find_by_id_and_delete(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }
}
