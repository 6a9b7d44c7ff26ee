//! Order controller.
//!
//! Orders are placed from the caller's cart: the lines are snapshotted with
//! their current catalog prices, the order is persisted as `placed`, and the
//! cart is cleared. Cancellation is a one-way transition.

use async_trait::async_trait;

use bramble_core::{OrderId, OrderStatus, UserId};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::models::{NewOrder, Order, OrderItem};
use crate::services::carts::CartStore;
use crate::services::products::ProductStore;

/// The order collection, as seen by the controller.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, new: NewOrder) -> std::result::Result<Order, RepositoryError>;

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> std::result::Result<Vec<Order>, RepositoryError>;

    async fn find_by_id(&self, id: OrderId)
    -> std::result::Result<Option<Order>, RepositoryError>;

    /// Transition a placed order to cancelled, stamping `cancelled_at`.
    /// Returns `None` when the order is missing or already cancelled, so a
    /// concurrent double-cancel cannot slip through.
    async fn cancel(&self, id: OrderId) -> std::result::Result<Option<Order>, RepositoryError>;
}

/// Order operations: place from cart, list, cancel.
pub struct OrderService<O, C, P> {
    orders: O,
    carts: C,
    products: P,
}

impl<O: OrderStore, C: CartStore, P: ProductStore> OrderService<O, C, P> {
    /// Create a new order service over the order, cart, and product stores.
    pub const fn new(orders: O, carts: C, products: P) -> Self {
        Self {
            orders,
            carts,
            products,
        }
    }

    /// Place an order from the caller's cart. The cart must exist and hold
    /// at least one line; every referenced product must still be in the
    /// catalog. On success the cart is cleared.
    ///
    /// # Errors
    ///
    /// `Validation` when the cart is missing/empty or a product vanished,
    /// `Repository` when the store fails.
    pub async fn place(&self, user_id: UserId) -> Result<Order> {
        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .filter(|cart| !cart.items.is_empty())
            .ok_or_else(|| ApiError::Validation("Cart is empty".to_owned()))?;

        let mut items = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            let product = self
                .products
                .find_by_id(line.product_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "Product {} is no longer available",
                        line.product_id
                    ))
                })?;

            items.push(OrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                price: product.price,
            });
        }

        let order = self.orders.create(NewOrder { user_id, items }).await?;

        // The cart is consumed by placement.
        self.carts.clear(cart.id).await?;

        Ok(order)
    }

    /// The caller's orders, newest first. An empty list is a successful
    /// result.
    ///
    /// # Errors
    ///
    /// `Repository` when the store fails.
    pub async fn details(&self, user_id: UserId) -> Result<Vec<Order>> {
        Ok(self.orders.find_by_user(user_id).await?)
    }

    /// Cancel one of the caller's placed orders. Orders belonging to other
    /// users read as not-found; an already-cancelled order is rejected -
    /// cancelled is terminal.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound`, or `Repository`.
    pub async fn cancel(&self, user_id: UserId, raw_id: &str) -> Result<Order> {
        let id: OrderId = raw_id
            .parse()
            .map_err(|_| ApiError::Validation("Invalid order id".to_owned()))?;

        let order = self
            .orders
            .find_by_id(id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or_else(|| ApiError::NotFound("Order not found".to_owned()))?;

        if order.status == OrderStatus::Cancelled {
            return Err(ApiError::Validation("Order is already cancelled".to_owned()));
        }

        self.orders
            .cancel(id)
            .await?
            .ok_or_else(|| ApiError::Validation("Order is already cancelled".to_owned()))
    }
}
