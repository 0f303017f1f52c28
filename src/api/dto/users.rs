/*
 * Responsibility
 * - Users の request/response DTO
 * - password は受け取るだけで、response に password_hash は決して含めない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldErrors;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug)]
pub struct ValidUser {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<ValidUser, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = self.username.map(|u| u.trim().to_string()).unwrap_or_default();
        if username.is_empty() {
            errors.insert("username", "username is required".to_string());
        } else if username.chars().count() < MIN_USERNAME_LEN {
            errors.insert(
                "username",
                format!("username must be at least {MIN_USERNAME_LEN} characters long"),
            );
        }

        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        if name.is_empty() {
            errors.insert("name", "name is required".to_string());
        }

        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            errors.insert("password", "password is required".to_string());
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters long"),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidUser {
            username,
            name,
            password,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserBlog {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub blogs: Vec<UserBlog>,
}
