/*
 * Responsibility
 * - blogs CRUD (BlogRepo trait)
 * - user_id の FK (CASCADE) 前提で、ユーザー削除時はブログも消える
 * - id は内部 ID (i64)。公開 ID への変換は IdCodec の責務
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    // Tri-state:
    // - None: do not update
    // - Some(None): set NULL
    // - Some(Some(v)): set v
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl BlogChanges {
    /// True when the update touches anything besides `likes`.
    pub fn edits_content(&self) -> bool {
        self.title.is_some() || self.author.is_some() || self.url.is_some()
    }

    pub fn apply_to(self, row: &mut BlogRow) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(author) = self.author {
            row.author = author;
        }
        if let Some(url) = self.url {
            row.url = url;
        }
        if let Some(likes) = self.likes {
            row.likes = likes;
        }
    }
}

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<BlogRow>>;

    async fn create(&self, blog: NewBlog) -> RepoResult<BlogRow>;

    async fn get(&self, id: i64) -> RepoResult<Option<BlogRow>>;

    async fn update(&self, id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgBlogRepo {
    pool: PgPool,
}

impl PgBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepo for PgBlogRepo {
    async fn list(&self) -> RepoResult<Vec<BlogRow>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at
            FROM blogs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, blog: NewBlog) -> RepoResult<BlogRow> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, url, likes, user_id, created_at
            "#,
        )
        .bind(&blog.title)
        .bind(blog.author.as_deref())
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(blog.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET
                title = COALESCE($2, title),
                author = CASE
                    WHEN $3 = false THEN author
                    ELSE $4
                END,
                url = COALESCE($5, url),
                likes = COALESCE($6, likes)
            WHERE id = $1
            RETURNING id, title, author, url, likes, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.author.is_some()) // $3: flag to set author
        .bind(changes.author.flatten()) // $4: new author value
        .bind(changes.url.as_deref())
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
