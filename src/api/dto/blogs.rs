/*
 * Responsibility
 * - Blogs の request/response DTO
 * - request の必須項目は Option で受け、validation でフィールド単位のエラーにする
 * - response の id は encode 済みの公開 ID (内部 ID を漏らさない)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldErrors;
use crate::repos::blog_repo::{BlogChanges, NewBlog};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

fn required(errors: &mut FieldErrors, field: &'static str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.insert(field, format!("{field} is required"));
            String::new()
        }
    }
}

fn check_likes(errors: &mut FieldErrors, likes: Option<i64>) {
    if let Some(n) = likes
        && n < 0
    {
        errors.insert("likes", "likes cannot be negative".to_string());
    }
}

impl CreateBlogRequest {
    /// Validates and attaches the owner. All field errors are reported at once.
    pub fn into_new_blog(self, user_id: Uuid) -> Result<NewBlog, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = required(&mut errors, "title", self.title);
        let url = required(&mut errors, "url", self.url);
        check_likes(&mut errors, self.likes);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewBlog {
            title,
            author: self.author.filter(|a| !a.trim().is_empty()),
            url,
            likes: self.likes.unwrap_or(0),
            user_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (clear author)
    // - Some(Some(v)): set value
    #[serde(default, with = "double_option")]
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub fn into_changes(self) -> Result<BlogChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            errors.insert("title", "title cannot be empty".to_string());
        }
        if let Some(url) = &self.url
            && url.trim().is_empty()
        {
            errors.insert("url", "url cannot be empty".to_string());
        }
        check_likes(&mut errors, self.likes);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BlogChanges {
            title: self.title,
            // Blank clears the author, same as on create.
            author: self
                .author
                .map(|a| a.filter(|a| !a.trim().is_empty())),
            url: self.url,
            likes: self.likes,
        })
    }
}

/// Distinguishes an explicit `null` from an absent field.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(de).map(Some)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlogOwner {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwner>,
}
