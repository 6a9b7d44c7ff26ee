//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bramble_core::{OrderId, OrderStatus, Price, ProductId, Quantity, UserId};

/// One line of an order: a snapshot of a cart line plus the unit price at
/// placement time. The price is copied, not referenced, so later catalog
/// edits never rewrite order history.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub price: Price,
}

/// A placed (or cancelled) order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub placed_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A validated order, ready to persist.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
}
