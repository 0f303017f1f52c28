/*
 * Responsibility
 * - Handler から見える「認証済みユーザー」の型
 * - resolve middleware が検証 + lookup して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の検証ロジックは middleware/services 側の責務
 * - password_hash など store 内部の値はここに載せない
 */
use uuid::Uuid;

use crate::repos::user_repo::UserRow;

/// The user a request is acting as. Exists only for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

impl From<UserRow> for AuthUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
        }
    }
}
