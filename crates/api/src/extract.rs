//! Request extractors with envelope-shaped rejections.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` with its rejection routed through [`ApiError`], so a body
/// that fails to parse is answered with the `{"msg": ...}` envelope instead
/// of axum's plain-text reply.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
