//! Cart repository for database operations.
//!
//! A cart is a `carts` row plus its `cart_items` rows; the repository
//! assembles the two into the `Cart` record the services work with.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bramble_core::{CartId, ProductId, Quantity, UserId};

use super::{RepositoryError, map_unique_violation};
use crate::models::{Cart, CartItem};
use crate::services::carts::CartStore;

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Postgres-backed cart store.
pub struct PgCarts<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCarts<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT product_id, quantity FROM cart_items WHERE cart_id = $1 ORDER BY product_id",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

    fn assemble(row: CartRow, items: Vec<CartItem>) -> Cart {
        Cart {
            id: row.id,
            user_id: row.user_id,
            items,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CartStore for PgCarts<'_> {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, user_id, created_at, updated_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let items = self.load_items(row.id).await?;
        Ok(Some(Self::assemble(row, items)))
    }

    async fn create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            "INSERT INTO carts (user_id) VALUES ($1)
             RETURNING id, user_id, created_at, updated_at",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Cart already exists"))?;

        Ok(Self::assemble(row, Vec::new()))
    }

    async fn set_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
                .bind(cart_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }

    async fn clear(&self, cart_id: CartId) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
