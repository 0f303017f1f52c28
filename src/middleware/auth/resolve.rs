//! Authentication resolver: bearer token → verified session → existing user.
//!
//! Attached per method router with `route_layer`, so only the handlers that
//! need a caller identity run it. Unsupported methods still get 405.
//! Every failure here is an authentication failure (401); the raw token and
//! the signing secret never appear in responses or logs.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthUser;
use crate::error::AppError;
use crate::middleware::auth::BearerToken;
use crate::state::AppState;

pub fn protect(route: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state, resolve_user))
}

async fn resolve_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Already resolved for this request.
    if req.extensions().get::<AuthUser>().is_some() {
        return Ok(next.run(req).await);
    }

    // The candidate token is consumed here; handlers never see it.
    let token = req
        .extensions_mut()
        .remove::<BearerToken>()
        .ok_or(AppError::unauthenticated("token missing"))?;

    let session = match state.tokens.verify(token.as_str()) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "session token verification failed");
            return Err(AppError::InvalidToken);
        }
    };

    let Some(user) = state.users.get(session.user_id).await? else {
        tracing::warn!(user_id = %session.user_id, "token subject does not resolve to a user");
        return Err(AppError::unauthenticated("user not found"));
    };

    tracing::debug!(user_id = %user.id, "request authenticated");
    req.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
        routing::get,
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::middleware::auth::bearer;
    use crate::repos::MemoryStore;
    use crate::repos::user_repo::{NewUser, UserRepo};
    use crate::services::{auth::TokenService, id_codec::IdCodec};

    async fn whoami(user: AuthUser) -> String {
        user.username
    }

    async fn setup() -> (Router, Arc<MemoryStore>, Arc<TokenService>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let tokens = Arc::new(TokenService::new(b"resolver-secret", 3600, 0));
        let codec = IdCodec::new(10, "abcdefghijklmnopqrstuvwxyz0123456789").unwrap();
        let state = AppState::new(store.clone(), store.clone(), codec, tokens.clone());

        let user = UserRepo::create(
            store.as_ref(),
            NewUser {
                username: "hellas".to_string(),
                name: "Arto Hellas".to_string(),
                password_hash: "unused".to_string(),
            },
        )
        .await
        .unwrap();

        let protected = Router::new().route("/me", protect(get(whoami), state.clone()));
        let app = bearer::apply(protected).with_state(state);

        (app, store, tokens, user.id)
    }

    async fn call(app: Router, auth: Option<String>) -> (StatusCode, String) {
        call_with(app, Method::GET, auth).await
    }

    async fn call_with(app: Router, method: Method, auth: Option<String>) -> (StatusCode, String) {
        let mut req = Request::builder().method(method).uri("/me");
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_of(body: &str) -> String {
        let value: Value = serde_json::from_str(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_as_user() {
        let (app, _store, tokens, user_id) = setup().await;
        let token = tokens.issue(user_id, "hellas").unwrap();

        let (status, body) = call(app, Some(format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hellas");
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let (app, ..) = setup().await;

        let (status, body) = call(app, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(&body), "token missing");
    }

    #[tokio::test]
    async fn forged_token_is_invalid_token_and_not_echoed() {
        let (app, _store, _tokens, user_id) = setup().await;
        let forged = TokenService::new(b"wrong-secret", 3600, 0)
            .issue(user_id, "hellas")
            .unwrap();

        let (status, body) = call(app, Some(format!("Bearer {forged}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(&body), "token invalid");
        assert!(!body.contains(&forged));
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_401() {
        let (app, store, tokens, user_id) = setup().await;
        let token = tokens.issue(user_id, "hellas").unwrap();
        assert!(store.delete_user(user_id).await);

        let (status, body) = call(app, Some(format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(&body), "user not found");
    }

    #[tokio::test]
    async fn unsupported_method_is_405_before_authentication() {
        let (app, ..) = setup().await;

        let (status, _) = call_with(app, Method::PATCH, None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
