/*
 * Responsibility
 * - /users 系 handler (一覧 / 登録)
 * - password は hash 化してから repo に渡す (平文は保存しない)
 * - username の重複は repo の Conflict → AppError::DuplicateKey
 */
use std::collections::HashMap;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::dto::users::{CreateUserRequest, UserBlog, UserResponse},
    error::AppError,
    repos::user_repo::{NewUser, UserRow},
    services::password,
    state::AppState,
};

fn user_response(row: UserRow, blogs: Vec<UserBlog>) -> UserResponse {
    UserResponse {
        id: row.id,
        username: row.username,
        name: row.name,
        blogs,
    }
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list().await?;

    let mut blogs_by_user: HashMap<Uuid, Vec<UserBlog>> = HashMap::new();
    for blog in state.blogs.list().await? {
        blogs_by_user.entry(blog.user_id).or_default().push(UserBlog {
            id: state.id_codec.encode(blog.id)?,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        });
    }

    let res = users
        .into_iter()
        .map(|u| {
            let blogs = blogs_by_user.remove(&u.id).unwrap_or_default();
            user_response(u, blogs)
        })
        .collect();

    Ok(Json(res))
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(req) = body?;
    let valid = req.validate().map_err(AppError::Validation)?;

    let password_hash = password::hash_password_blocking(valid.password).await?;

    let row = state
        .users
        .create(NewUser {
            username: valid.username,
            name: valid.name,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = %row.id, username = %row.username, "user created");

    Ok((StatusCode::CREATED, Json(user_response(row, Vec::new()))))
}
