pub mod blog_repo;
pub mod error;
pub mod memory;
pub mod user_repo;

pub use blog_repo::{BlogRepo, PgBlogRepo};
pub use error::RepoError;
pub use memory::MemoryStore;
pub use user_repo::{PgUserRepo, UserRepo};
