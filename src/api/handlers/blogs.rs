/*
 * Responsibility
 * - /blogs 系 CRUD handler
 * - Path の {id} は公開 ID → PublicBlogId extractor で内部 ID に変換して受け取る
 * - 変更系は AuthUser (resolve middleware が付与) を受け取り、所有者チェックをここで行う
 * - 失敗は AppError を返すだけ。レスポンス整形は error classifier に任せる
 */
use std::collections::HashMap;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::{
        dto::blogs::{BlogOwner, BlogResponse, CreateBlogRequest, UpdateBlogRequest},
        extractors::{AuthUser, PublicBlogId},
    },
    error::AppError,
    repos::{blog_repo::BlogRow, user_repo::UserRow},
    state::AppState,
};

fn owner_of(row: UserRow) -> BlogOwner {
    BlogOwner {
        id: row.id,
        username: row.username,
        name: row.name,
    }
}

fn row_to_response(
    state: &AppState,
    row: BlogRow,
    user: Option<BlogOwner>,
) -> Result<BlogResponse, AppError> {
    Ok(BlogResponse {
        id: state.id_codec.encode(row.id)?,
        title: row.title,
        author: row.author,
        url: row.url,
        likes: row.likes,
        user,
    })
}

async fn with_owner(state: &AppState, row: BlogRow) -> Result<BlogResponse, AppError> {
    let owner = state.users.get(row.user_id).await?.map(owner_of);
    row_to_response(state, row, owner)
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = state.blogs.list().await?;
    let owners: HashMap<Uuid, BlogOwner> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(|u| (u.id, owner_of(u)))
        .collect();

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        let owner = owners.get(&row.user_id).cloned();
        res.push(row_to_response(&state, row, owner)?);
    }

    Ok(Json(res))
}

pub async fn get_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
) -> Result<Json<BlogResponse>, AppError> {
    let row = state
        .blogs
        .get(blog_id.id)
        .await?
        .ok_or(AppError::missing("blog"))?;

    Ok(Json(with_owner(&state, row).await?))
}

pub async fn create_blog(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    let Json(req) = body?;
    let new_blog = req.into_new_blog(user.id).map_err(AppError::Validation)?;

    let row = state.blogs.create(new_blog).await?;
    tracing::info!(blog_id = row.id, user_id = %user.id, "blog created");

    let owner = BlogOwner {
        id: user.id,
        username: user.username,
        name: user.name,
    };
    let res = row_to_response(&state, row, Some(owner))?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_blog(
    State(state): State<AppState>,
    user: AuthUser,
    blog_id: PublicBlogId,
    body: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<Json<BlogResponse>, AppError> {
    let Json(req) = body?;
    let changes = req.into_changes().map_err(AppError::Validation)?;

    let existing = state
        .blogs
        .get(blog_id.id)
        .await?
        .ok_or(AppError::missing("blog"))?;

    // Anyone signed in may like a blog; content edits are the owner's.
    if changes.edits_content() && existing.user_id != user.id {
        return Err(AppError::forbidden("only the creator can edit a blog"));
    }

    let row = state
        .blogs
        .update(blog_id.id, changes)
        .await?
        .ok_or(AppError::missing("blog"))?;

    Ok(Json(with_owner(&state, row).await?))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    user: AuthUser,
    blog_id: PublicBlogId,
) -> Result<StatusCode, AppError> {
    let existing = state
        .blogs
        .get(blog_id.id)
        .await?
        .ok_or(AppError::missing("blog"))?;

    if existing.user_id != user.id {
        tracing::warn!(blog_id = existing.id, user_id = %user.id, "delete refused for non-owner");
        return Err(AppError::forbidden("only the creator can delete a blog"));
    }

    if !state.blogs.delete(blog_id.id).await? {
        return Err(AppError::missing("blog"));
    }
    tracing::info!(blog_id = existing.id, user_id = %user.id, "blog deleted");

    Ok(StatusCode::NO_CONTENT)
}
