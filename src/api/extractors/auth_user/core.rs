use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthUser;

/// Handler で AuthUser を受け取るための extractor。
/// resolve middleware が AuthUser を extensions に insert 済みである前提。
/// 見つからない場合は 401 (middleware が掛かっていない route で使われた)
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::unauthenticated("token missing"))
    }
}
