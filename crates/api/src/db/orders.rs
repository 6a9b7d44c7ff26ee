//! Order repository for database operations.
//!
//! An order is an `orders` row plus its `order_items` rows. Item rows carry
//! the unit price snapshotted at placement; they reference products by bare
//! id on purpose, so deleting a catalog product never rewrites or blocks
//! order history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bramble_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderItem};
use crate::services::orders::OrderStore;

const ORDER_COLUMNS: &str = "id, user_id, status, placed_at, cancelled_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

/// Postgres-backed order store.
pub struct PgOrders<'a> {
    pool: &'a PgPool,
}

impl<'a> PgOrders<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT product_id, quantity, price FROM order_items
             WHERE order_id = $1 ORDER BY product_id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

    fn assemble(row: OrderRow, items: Vec<OrderItem>) -> Order {
        Order {
            id: row.id,
            user_id: row.user_id,
            status: row.status,
            items,
            placed_at: row.placed_at,
            cancelled_at: row.cancelled_at,
        }
    }
}

#[async_trait]
impl OrderStore for PgOrders<'_> {
    async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id) VALUES ($1) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &new.items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, price)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Self::assemble(row, new.items))
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE user_id = $1 ORDER BY placed_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.load_items(row.id).await?;
            orders.push(Self::assemble(row, items));
        }
        Ok(orders)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let items = self.load_items(row.id).await?;
        Ok(Some(Self::assemble(row, items)))
    }

    async fn cancel(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        // The status guard makes the transition atomic: a concurrent cancel
        // loses the race and sees no row.
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = 'cancelled', cancelled_at = NOW()
             WHERE id = $1 AND status = 'placed'
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let items = self.load_items(row.id).await?;
        Ok(Some(Self::assemble(row, items)))
    }
}
