/*
 * Responsibility
 * - POST /login: username + password を検証し、セッショントークンを発行する
 * - ユーザー不在とパスワード不一致は同じ 401 を返す (どちらかを区別させない)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::dto::login::{LoginRequest, LoginResponse},
    error::AppError,
    services::password,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = body?;
    let (username, candidate) = req.validate().map_err(AppError::Validation)?;

    let Some(user) = state.users.find_by_username(&username).await? else {
        tracing::info!(%username, "login for unknown user");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    };

    if !password::verify_password_blocking(candidate, user.password_hash.clone()).await? {
        tracing::info!(user_id = %user.id, "login with wrong password");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(user.id, &user.username).map_err(|err| {
        tracing::error!(error = %err, "failed to issue session token");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
