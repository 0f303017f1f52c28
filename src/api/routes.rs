/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - 認証が必要な route (blogs の作成・更新・削除) は protected 側にまとめ、
 *   method router ごとに resolve middleware を route_layer で掛ける (未対応 method は 405)
 * - 同じ path で GET は public、POST/PUT/DELETE は protected になるよう merge する
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::handlers::{
    blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog},
    login::login,
    users::{create_user, list_users},
};
use crate::middleware::auth::resolve;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/blogs", get(list_blogs))
        .route("/blogs/{id}", get(get_blog))
        .route("/users", get(list_users).post(create_user))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/blogs", resolve::protect(post(create_blog), state.clone()))
        .route(
            "/blogs/{id}",
            resolve::protect(put(update_blog).delete(delete_blog), state),
        );

    public.merge(protected)
}
