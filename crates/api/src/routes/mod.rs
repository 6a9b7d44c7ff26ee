//! HTTP route table.
//!
//! Pure declarative mapping from method + path to handler; path parameters
//! are passed through as raw strings and validated by the controllers. The
//! auth guard is attached per-handler via the `RequireAuth` extractor.
//!
//! # Route Structure
//!
//! ```text
//! # Users
//! POST   /addUser                 - register (open)
//! GET    /getAllUsers             - list accounts (auth)
//! PUT    /updateUser/{id}         - partial update (auth)
//! GET    /getUserByGender         - list by gender (open)
//! DELETE /deleteUser/{id}         - delete account (auth)
//! POST   /login                   - mint bearer token (open)
//!
//! # Products
//! POST   /addProduct              - add to catalog (auth)
//! GET    /productDetails          - list catalog (open)
//! GET    /getProduct/{id}         - fetch one (open)
//! GET    /getProductsByQuery      - filter catalog (open)
//! PUT    /updateProduct/{id}      - partial update (auth)
//! DELETE /deleteProduct/{id}      - delete (auth)
//!
//! # Cart (all auth, caller's own cart)
//! POST   /addToCart               - add line / increment
//! GET    /cartDetails             - read cart
//! PUT    /updateCart              - set line quantity
//! DELETE /removeItem/{productId}  - remove line
//! DELETE /clearCart               - remove all lines
//!
//! # Orders (all auth, caller's own orders)
//! POST   /placeOrder              - snapshot cart into order
//! GET    /orderDetails            - list orders
//! DELETE /cancelOrder/{id}        - cancel placed order
//! ```

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/addUser", post(users::add_user))
        .route("/getAllUsers", get(users::get_all_users))
        .route("/updateUser/{id}", put(users::update_user))
        .route("/getUserByGender", get(users::get_user_by_gender))
        .route("/deleteUser/{id}", delete(users::delete_user))
        .route("/login", post(users::login))
        // Products
        .route("/addProduct", post(products::add_product))
        .route("/productDetails", get(products::product_details))
        .route("/getProduct/{id}", get(products::get_product))
        .route("/getProductsByQuery", get(products::get_products_by_query))
        .route("/updateProduct/{id}", put(products::update_product))
        .route("/deleteProduct/{id}", delete(products::delete_product))
        // Cart
        .route("/addToCart", post(carts::add_to_cart))
        .route("/cartDetails", get(carts::cart_details))
        .route("/updateCart", put(carts::update_cart))
        .route("/removeItem/{productId}", delete(carts::remove_item))
        .route("/clearCart", delete(carts::clear_cart))
        // Orders
        .route("/placeOrder", post(orders::place_order))
        .route("/orderDetails", get(orders::order_details))
        .route("/cancelOrder/{id}", delete(orders::cancel_order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use secrecy::SecretString;
    use serde_json::Value;
    use tower::ServiceExt;

    use bramble_core::UserId;

    use crate::config::ApiConfig;
    use crate::services::auth;
    use crate::state::AppState;

    /// State over a lazy pool: the URL is parsed but no connection is made,
    /// so these tests prove the auth gate fires before any store access.
    fn test_state() -> AppState {
        let config = ApiConfig {
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            database_url: SecretString::from("postgres://localhost/unused"),
            token_secret: SecretString::from("qL8mB2vN5xR1tY7wK4jH9dF3gS6aZ0pC"),
            token_ttl_hours: 1,
        };
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AppState::new(config, pool)
    }

    fn app() -> Router {
        routes().with_state(test_state())
    }

    const PROTECTED: &[(&str, &str)] = &[
        ("GET", "/getAllUsers"),
        ("PUT", "/updateUser/1"),
        ("DELETE", "/deleteUser/1"),
        ("POST", "/addProduct"),
        ("PUT", "/updateProduct/1"),
        ("DELETE", "/deleteProduct/1"),
        ("POST", "/addToCart"),
        ("GET", "/cartDetails"),
        ("PUT", "/updateCart"),
        ("DELETE", "/removeItem/1"),
        ("DELETE", "/clearCart"),
        ("POST", "/placeOrder"),
        ("GET", "/orderDetails"),
        ("DELETE", "/cancelOrder/1"),
    ];

    async fn request(method: &str, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_protected_routes_reject_missing_token() {
        for &(method, uri) in PROTECTED {
            let (status, body) = request(method, uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert!(body["msg"].is_string(), "{method} {uri} lacks envelope");
        }
    }

    #[tokio::test]
    async fn test_protected_routes_reject_garbage_token() {
        let (status, body) = request("GET", "/getAllUsers", Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "Invalid authentication token");
    }

    #[tokio::test]
    async fn test_protected_routes_reject_expired_token() {
        let state = test_state();
        // minted two hours in the past with a one-hour ttl
        let expired = auth::issue_token(
            state.token_keys(),
            UserId::new(1),
            chrono::Utc::now().timestamp() - 7200,
            1,
        )
        .unwrap();

        let (status, body) = request("GET", "/orderDetails", Some(&expired)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "Authentication token has expired");
    }

    #[tokio::test]
    async fn test_wrong_scheme_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/cartDetails")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = request("GET", "/definitelyNotARoute", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_open_routes_do_not_require_token() {
        // Missing-parameter validation fires (400), not the auth gate (401):
        // the request got past authentication.
        let (status, body) = request("GET", "/getUserByGender", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Gender query parameter is required");

        let (status, body) = request("GET", "/getProductsByQuery", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Please provide at least one query parameter");
    }

    #[tokio::test]
    async fn test_malformed_path_id_rejected_before_store() {
        // open route, malformed id: controller-level 400, no database needed
        let (status, body) = request("GET", "/getProduct/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid product id");
    }
}
