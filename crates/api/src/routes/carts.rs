//! Cart route handlers. Every cart route is protected; the cart acted on is
//! always the caller's own.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::db::{PgCarts, PgProducts};
use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::RequireAuth;
use crate::models::{Cart, CartItemPayload};
use crate::services::CartService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub msg: String,
    pub cart: Cart,
}

#[derive(Debug, Serialize)]
pub struct CartDetailsResponse {
    pub msg: String,
    pub cart: Option<Cart>,
}

#[derive(Debug, Serialize)]
pub struct ClearCartResponse {
    pub msg: String,
    pub removed: u64,
}

fn service(state: &AppState) -> CartService<PgCarts<'_>, PgProducts<'_>> {
    CartService::new(PgCarts::new(state.pool()), PgProducts::new(state.pool()))
}

/// `POST /addToCart` - add a product to the caller's cart.
pub async fn add_to_cart(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CartItemPayload>,
) -> Result<Json<CartResponse>> {
    let cart = service(&state).add_item(caller.id, payload).await?;

    Ok(Json(CartResponse {
        msg: "Item added to cart".to_owned(),
        cart,
    }))
}

/// `GET /cartDetails` - the caller's cart. A user with no cart yet gets an
/// empty-cart success, never a 404.
pub async fn cart_details(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<CartDetailsResponse>> {
    let cart = service(&state).details(caller.id).await?;

    let msg = match &cart {
        Some(cart) if !cart.items.is_empty() => "Cart details",
        _ => "Cart is empty",
    };

    Ok(Json(CartDetailsResponse {
        msg: msg.to_owned(),
        cart,
    }))
}

/// `PUT /updateCart` - set the quantity of a line already in the cart.
pub async fn update_cart(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CartItemPayload>,
) -> Result<Json<CartResponse>> {
    let cart = service(&state).update_item(caller.id, payload).await?;

    Ok(Json(CartResponse {
        msg: "Cart updated successfully".to_owned(),
        cart,
    }))
}

/// `DELETE /removeItem/{productId}` - remove one line from the cart.
pub async fn remove_item(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart = service(&state).remove_item(caller.id, &product_id).await?;

    Ok(Json(CartResponse {
        msg: "Item removed from cart".to_owned(),
        cart,
    }))
}

/// `DELETE /clearCart` - remove every line from the cart.
pub async fn clear_cart(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ClearCartResponse>> {
    let removed = service(&state).clear(caller.id).await?;

    Ok(Json(ClearCartResponse {
        msg: "Cart cleared".to_owned(),
        removed,
    }))
}
