use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(username, password)`.
    pub fn validate(self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.as_deref().is_none_or(|u| u.trim().is_empty()) {
            errors.insert("username", "username is required".to_string());
        }
        if self.password.as_deref().is_none_or(str::is_empty) {
            errors.insert("password", "password is required".to_string());
        }

        match (self.username, self.password) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok((username.trim().to_string(), password))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}
