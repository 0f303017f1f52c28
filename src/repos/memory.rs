//! In-process store used when no `DATABASE_URL` is configured (development)
//! and by the tests.
//!
//! Mirrors the Postgres schema constraints that callers rely on:
//! - `users.username` is unique (`RepoError::Conflict`)
//! - deleting a user cascades to its blogs
//! - blog ids are assigned from a monotonically increasing sequence

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::blog_repo::{BlogChanges, BlogRepo, BlogRow, NewBlog};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{NewUser, UserRepo, UserRow};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    blogs: BTreeMap<i64, BlogRow>,
    next_blog_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delete_user(&self, id: Uuid) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        tables.blogs.retain(|_, b| b.user_id != id);
        tables.users.len() != before
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Conflict { field: "username" });
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());

        Ok(row)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl BlogRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<BlogRow>> {
        Ok(self.tables.read().await.blogs.values().cloned().collect())
    }

    async fn create(&self, blog: NewBlog) -> RepoResult<BlogRow> {
        let mut tables = self.tables.write().await;
        tables.next_blog_id += 1;
        let id = tables.next_blog_id;

        let row = BlogRow {
            id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user_id: blog.user_id,
            created_at: Utc::now(),
        };
        tables.blogs.insert(id, row.clone());

        Ok(row)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<BlogRow>> {
        Ok(self.tables.read().await.blogs.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.blogs.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(row);

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.blogs.remove(&id).is_some())
    }
}
