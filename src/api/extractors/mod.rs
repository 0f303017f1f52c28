pub mod auth_user;
pub mod public_id;

pub use auth_user::AuthUser;
pub use public_id::PublicBlogId;
