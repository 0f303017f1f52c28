//! Shared helpers for black-box API tests: the real router over the in-memory store.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use bloglist::{
    app::build_router,
    repos::{
        MemoryStore,
        blog_repo::{BlogRepo, BlogRow, NewBlog},
        user_repo::{NewUser, UserRepo, UserRow},
    },
    services::{auth::TokenService, id_codec::IdCodec, password::hash_password},
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret";
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<TokenService>,
    pub codec: IdCodec,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenService::new(SECRET, 3600, 0));
    let codec = IdCodec::new(10, ALPHABET).unwrap();
    let state = AppState::new(store.clone(), store.clone(), codec.clone(), tokens.clone());

    TestApp {
        router: build_router(state),
        store,
        tokens,
        codec,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();

        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// Inserts a user directly into the store with a real password hash.
    pub async fn seed_user(&self, username: &str, name: &str, password: &str) -> UserRow {
        UserRepo::create(
            self.store.as_ref(),
            NewUser {
                username: username.to_string(),
                name: name.to_string(),
                password_hash: hash_password(password).unwrap(),
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_blog(&self, owner: &UserRow, title: &str, likes: i64) -> BlogRow {
        BlogRepo::create(
            self.store.as_ref(),
            NewBlog {
                title: title.to_string(),
                author: Some("Michael Chan".to_string()),
                url: format!("https://example.com/{}", title.replace(' ', "-")),
                likes,
                user_id: owner.id,
            },
        )
        .await
        .unwrap()
    }

    pub fn token_for(&self, user: &UserRow) -> String {
        self.tokens.issue(user.id, &user.username).unwrap()
    }

    pub fn public_id(&self, blog: &BlogRow) -> String {
        self.codec.encode(blog.id).unwrap()
    }

    pub async fn blog_count(&self) -> usize {
        BlogRepo::list(self.store.as_ref()).await.unwrap().len()
    }

    pub async fn user_count(&self) -> usize {
        UserRepo::list(self.store.as_ref()).await.unwrap().len()
    }
}
