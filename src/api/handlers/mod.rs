pub mod blogs;
pub mod health;
pub mod login;
pub mod unknown;
pub mod users;
