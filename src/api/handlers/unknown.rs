use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Fallback for requests that match no route.
pub async fn unknown_endpoint() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "unknown endpoint"})),
    )
}
