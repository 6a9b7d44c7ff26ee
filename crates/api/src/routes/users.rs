//! User route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::db::PgUsers;
use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::RequireAuth;
use crate::models::{LoginPayload, User, UserPayload};
use crate::services::{UserService, auth};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub msg: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub msg: String,
    pub count: usize,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct GenderQuery {
    pub gender: Option<String>,
}

/// `POST /addUser` - register a new account.
pub async fn add_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserPayload>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let service = UserService::new(PgUsers::new(state.pool()));
    let user = service.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            msg: "User registered successfully".to_owned(),
            user,
        }),
    ))
}

/// `POST /login` - verify credentials and mint a bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    let service = UserService::new(PgUsers::new(state.pool()));
    let user = service.login(payload).await?;

    let token = auth::issue_token(
        state.token_keys(),
        user.id,
        chrono::Utc::now().timestamp(),
        state.config().token_ttl_hours,
    )?;

    Ok(Json(LoginResponse {
        msg: "Login successful".to_owned(),
        token,
        user,
    }))
}

/// `GET /getAllUsers` - list every account.
pub async fn get_all_users(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<UsersListResponse>> {
    let users = UserService::new(PgUsers::new(state.pool())).list().await?;

    let msg = if users.is_empty() {
        "No users found"
    } else {
        "Users list"
    };

    Ok(Json(UsersListResponse {
        msg: msg.to_owned(),
        count: users.len(),
        users,
    }))
}

/// `GET /getUserByGender?gender=` - list accounts by gender.
pub async fn get_user_by_gender(
    State(state): State<AppState>,
    Query(query): Query<GenderQuery>,
) -> Result<Json<UsersListResponse>> {
    let users = UserService::new(PgUsers::new(state.pool()))
        .list_by_gender(query.gender.as_deref())
        .await?;

    let msg = if users.is_empty() {
        "No users found"
    } else {
        "Users list"
    };

    Ok(Json(UsersListResponse {
        msg: msg.to_owned(),
        count: users.len(),
        users,
    }))
}

/// `PUT /updateUser/{id}` - partial account update.
pub async fn update_user(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UserPayload>,
) -> Result<Json<UserResponse>> {
    let user = UserService::new(PgUsers::new(state.pool()))
        .update(&id, payload)
        .await?;

    Ok(Json(UserResponse {
        msg: "User updated successfully".to_owned(),
        user,
    }))
}

/// `DELETE /deleteUser/{id}` - delete an account.
pub async fn delete_user(
    RequireAuth(_caller): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = UserService::new(PgUsers::new(state.pool()))
        .delete(&id)
        .await?;

    Ok(Json(UserResponse {
        msg: "User deleted successfully".to_owned(),
        user,
    }))
}
