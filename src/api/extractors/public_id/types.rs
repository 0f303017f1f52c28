/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジック / extractor 実装は core.rs
 */
use super::core::PublicId;

// blogs
pub enum BlogTag {}
pub type PublicBlogId = PublicId<BlogTag>;
