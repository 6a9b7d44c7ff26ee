//! Order route handlers. Every order route is protected; orders are always
//! the caller's own.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::db::{PgCarts, PgOrders, PgProducts};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::OrderService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub msg: String,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub msg: String,
    pub count: usize,
    pub orders: Vec<Order>,
}

fn service(state: &AppState) -> OrderService<PgOrders<'_>, PgCarts<'_>, PgProducts<'_>> {
    OrderService::new(
        PgOrders::new(state.pool()),
        PgCarts::new(state.pool()),
        PgProducts::new(state.pool()),
    )
}

/// `POST /placeOrder` - snapshot the caller's cart into a new order.
pub async fn place_order(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let order = service(&state).place(caller.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            msg: "Order placed successfully".to_owned(),
            order,
        }),
    ))
}

/// `GET /orderDetails` - the caller's orders, newest first.
pub async fn order_details(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>> {
    let orders = service(&state).details(caller.id).await?;

    let msg = if orders.is_empty() {
        "No orders found"
    } else {
        "Orders list"
    };

    Ok(Json(OrderListResponse {
        msg: msg.to_owned(),
        count: orders.len(),
        orders,
    }))
}

/// `DELETE /cancelOrder/{id}` - cancel one of the caller's placed orders.
pub async fn cancel_order(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order = service(&state).cancel(caller.id, &id).await?;

    Ok(Json(OrderResponse {
        msg: "Order cancelled successfully".to_owned(),
        order,
    }))
}
