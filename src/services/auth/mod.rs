pub mod factory;
pub mod session_token;

pub use factory::build_token_service;
pub use session_token::{TokenError, TokenService, VerifiedSession};
