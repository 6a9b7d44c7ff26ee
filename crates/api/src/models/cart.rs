//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bramble_core::{CartId, ProductId, Quantity, UserId};

/// One line in a cart: a product reference and a positive quantity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A user's cart. Owned by exactly one user; created implicitly on the
/// first add.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// The stored quantity for a product, if the line exists.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<Quantity> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }
}

/// Raw cart mutation payload (`POST /addToCart`, `PUT /updateCart`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemPayload {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

impl CartItemPayload {
    /// True when the client supplied no recognized field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_id.is_none() && self.quantity.is_none()
    }
}
