/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer 抽出 / 認証解決, cors: CORS policy, http: request-id / trace / body limit
 */
pub mod auth;
pub mod cors;
pub mod http;
