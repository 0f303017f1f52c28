mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn unknown_route_is_404_json() {
    let app = spawn_app();

    let res = app.get("/api/nothing-here").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({"error": "unknown endpoint"}));
}

#[tokio::test]
async fn unknown_route_with_token_is_still_404() {
    let app = spawn_app();
    let user = app.seed_user("root", "Superuser", "sekret").await;

    let res = app
        .request(Method::POST, "/nope", Some(&app.token_for(&user)), None)
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app();

    let res = app.get("/health").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"status": "ok"}));
}

#[tokio::test]
async fn reads_do_not_require_a_token() {
    let app = spawn_app();

    assert_eq!(app.get("/api/blogs").await.status, StatusCode::OK);
    assert_eq!(app.get("/api/users").await.status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_token_on_public_route_is_ignored() {
    let app = spawn_app();

    let res = app
        .request(Method::GET, "/api/blogs", Some("garbage"), None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_json_body_is_a_validation_failure() {
    let app = spawn_app();
    let user = app.seed_user("root", "Superuser", "sekret").await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/blogs")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token_for(&user)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let res = app.send(req).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"]["body"].is_string());
    assert_eq!(app.blog_count().await, 0);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app();

    let res = app.get("/health").await;

    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn incoming_request_id_is_propagated() {
    let app = spawn_app();

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let res = app.send(req).await;

    assert_eq!(res.headers["x-request-id"], "req-123");
}
