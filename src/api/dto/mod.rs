pub mod blogs;
pub mod login;
pub mod users;
