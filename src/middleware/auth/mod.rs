/*
 * Responsibility
 * - bearer: Authorization ヘッダから候補 token を取り出す (全リクエスト、拒否しない)
 * - resolve: token 検証 → ユーザー lookup → AuthUser を extensions に入れる (保護 route のみ)
 */
pub mod bearer;
pub mod resolve;

pub use bearer::BearerToken;
