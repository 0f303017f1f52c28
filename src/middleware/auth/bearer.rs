//! Bearer token extraction.
//!
//! Runs for every request and never rejects: a missing or non-Bearer
//! `Authorization` header simply leaves the request without a candidate token.
//! Whether a token is required is decided later by `resolve`.

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

/// Candidate token taken from `Authorization: Bearer <token>`. Not yet verified.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// The scheme prefix is matched case-sensitively, as `"Bearer "`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(extract_bearer))
}

async fn extract_bearer(mut req: Request, next: Next) -> Response {
    let token = bearer_token(req.headers()).map(|t| BearerToken(t.to_string()));

    if let Some(token) = token {
        req.extensions_mut().insert(token);
    }

    next.run(req).await
}
