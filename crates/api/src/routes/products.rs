//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::db::PgProducts;
use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::RequireAuth;
use crate::models::{Product, ProductPayload, ProductQueryParams};
use crate::services::ProductService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub msg: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub msg: String,
    pub count: usize,
    pub products: Vec<Product>,
}

/// `POST /addProduct` - add a product to the catalog.
pub async fn add_product(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let product = ProductService::new(PgProducts::new(state.pool()))
        .create(payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            msg: "Product added successfully".to_owned(),
            product,
        }),
    ))
}

/// `GET /productDetails` - list the whole catalog. An empty catalog is a
/// success with an empty list, not a 404.
pub async fn product_details(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>> {
    let products = ProductService::new(PgProducts::new(state.pool()))
        .list()
        .await?;

    let msg = if products.is_empty() {
        "No products found"
    } else {
        "Products list"
    };

    Ok(Json(ProductListResponse {
        msg: msg.to_owned(),
        count: products.len(),
        products,
    }))
}

/// `GET /getProduct/{id}` - fetch one product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = ProductService::new(PgProducts::new(state.pool()))
        .get(&id)
        .await?;

    Ok(Json(ProductResponse {
        msg: "Product found".to_owned(),
        product,
    }))
}

/// `GET /getProductsByQuery` - filter the catalog.
pub async fn get_products_by_query(
    State(state): State<AppState>,
    Query(params): Query<ProductQueryParams>,
) -> Result<Json<ProductListResponse>> {
    let products = ProductService::new(PgProducts::new(state.pool()))
        .query(params)
        .await?;

    let msg = if products.is_empty() {
        "No products match your query"
    } else {
        "Filtered products"
    };

    Ok(Json(ProductListResponse {
        msg: msg.to_owned(),
        count: products.len(),
        products,
    }))
}

/// `PUT /updateProduct/{id}` - partial product update.
pub async fn update_product(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<Json<ProductResponse>> {
    let product = ProductService::new(PgProducts::new(state.pool()))
        .update(&id, payload)
        .await?;

    Ok(Json(ProductResponse {
        msg: "Product updated successfully".to_owned(),
        product,
    }))
}

/// `DELETE /deleteProduct/{id}` - remove a product from the catalog.
pub async fn delete_product(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = ProductService::new(PgProducts::new(state.pool()))
        .delete(&id)
        .await?;

    Ok(Json(ProductResponse {
        msg: "Product deleted successfully".to_owned(),
        product,
    }))
}
