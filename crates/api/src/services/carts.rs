//! Shopping cart controller.
//!
//! Every operation acts on the caller's own cart, resolved from the token
//! identity. The cart is created implicitly on the first add.

use async_trait::async_trait;

use bramble_core::{CartId, ProductId, Quantity, UserId};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::models::{Cart, CartItemPayload};
use crate::services::products::ProductStore;

/// The cart collection, as seen by the controller.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> std::result::Result<Option<Cart>, RepositoryError>;

    async fn create(&self, user_id: UserId) -> std::result::Result<Cart, RepositoryError>;

    /// Insert or replace one line.
    async fn set_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> std::result::Result<(), RepositoryError>;

    /// Remove one line; returns whether a line existed.
    async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> std::result::Result<bool, RepositoryError>;

    /// Remove every line; returns how many were removed.
    async fn clear(&self, cart_id: CartId) -> std::result::Result<u64, RepositoryError>;
}

/// Cart operations: add, read, set quantity, remove line, clear.
pub struct CartService<C, P> {
    carts: C,
    products: P,
}

impl<C: CartStore, P: ProductStore> CartService<C, P> {
    /// Create a new cart service over the cart and product stores.
    pub const fn new(carts: C, products: P) -> Self {
        Self { carts, products }
    }

    /// Add a product to the caller's cart, creating the cart if this is the
    /// first add. Adding a product already in the cart increments the line
    /// quantity.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `NotFound` when the product does not
    /// exist, `Repository` when the store fails.
    pub async fn add_item(&self, user_id: UserId, payload: CartItemPayload) -> Result<Cart> {
        if payload.is_empty() {
            return Err(ApiError::Validation("No data provided".to_owned()));
        }

        let product_id = parse_payload_product_id(payload.product_id)?;
        let quantity = match payload.quantity {
            None => Quantity::ONE,
            Some(raw) => parse_quantity(raw)?,
        };

        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))?;

        let cart = match self.carts.find_by_user(user_id).await? {
            Some(cart) => cart,
            None => self.carts.create(user_id).await?,
        };

        let new_quantity = cart
            .quantity_of(product_id)
            .map_or(quantity, |current| current.saturating_add(quantity));

        self.carts
            .set_item(cart.id, product_id, new_quantity)
            .await?;

        self.reload(user_id).await
    }

    /// The caller's cart. `None` means no cart exists yet, which the route
    /// layer renders as an empty-cart success, never a 404.
    ///
    /// # Errors
    ///
    /// `Repository` when the store fails.
    pub async fn details(&self, user_id: UserId) -> Result<Option<Cart>> {
        Ok(self.carts.find_by_user(user_id).await?)
    }

    /// Set the quantity of a line that is already in the cart.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `NotFound` when the cart or the line
    /// does not exist.
    pub async fn update_item(&self, user_id: UserId, payload: CartItemPayload) -> Result<Cart> {
        if payload.is_empty() {
            return Err(ApiError::Validation("No data provided".to_owned()));
        }

        let product_id = parse_payload_product_id(payload.product_id)?;
        let quantity = payload
            .quantity
            .ok_or_else(|| ApiError::Validation("Quantity is required".to_owned()))
            .and_then(parse_quantity)?;

        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cart not found".to_owned()))?;

        if cart.quantity_of(product_id).is_none() {
            return Err(ApiError::NotFound("Product not in cart".to_owned()));
        }

        self.carts.set_item(cart.id, product_id, quantity).await?;

        self.reload(user_id).await
    }

    /// Remove one line from the caller's cart.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed path id, `NotFound` when the cart or the
    /// line does not exist.
    pub async fn remove_item(&self, user_id: UserId, raw_product_id: &str) -> Result<Cart> {
        let product_id: ProductId = raw_product_id
            .parse()
            .map_err(|_| ApiError::Validation("Invalid product id".to_owned()))?;

        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cart not found".to_owned()))?;

        if !self.carts.remove_item(cart.id, product_id).await? {
            return Err(ApiError::NotFound("Product not in cart".to_owned()));
        }

        self.reload(user_id).await
    }

    /// Remove every line from the caller's cart. Clearing a cart that does
    /// not exist or is already empty succeeds with zero removed.
    ///
    /// # Errors
    ///
    /// `Repository` when the store fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64> {
        match self.carts.find_by_user(user_id).await? {
            Some(cart) => Ok(self.carts.clear(cart.id).await?),
            None => Ok(0),
        }
    }

    async fn reload(&self, user_id: UserId) -> Result<Cart> {
        self.carts
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ApiError::Internal("cart vanished mid-request".to_owned()))
    }
}

fn parse_payload_product_id(value: Option<i32>) -> Result<ProductId> {
    match value {
        Some(raw) if raw > 0 => Ok(ProductId::new(raw)),
        _ => Err(ApiError::Validation("Valid product id is required".to_owned())),
    }
}

fn parse_quantity(raw: i32) -> Result<Quantity> {
    Quantity::parse(raw)
        .map_err(|_| ApiError::Validation("Quantity must be a positive whole number".to_owned()))
}
