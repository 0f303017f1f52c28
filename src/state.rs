/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users / blogs: store (Postgres or in-memory) を trait object で持つ
 *   - id_codec: 公開 ID 変換
 *   - tokens: セッショントークンの発行・検証 (read-only secret)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{BlogRepo, UserRepo};
use crate::services::{auth::TokenService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub blogs: Arc<dyn BlogRepo>,
    pub id_codec: IdCodec,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepo>,
        blogs: Arc<dyn BlogRepo>,
        id_codec: IdCodec,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            blogs,
            id_codec,
            tokens,
        }
    }
}
