/*
 * Responsibility
 * - アプリ共通の AppError 定義 (失敗の種類をタグ付き enum で表す)
 * - IntoResponse 実装が唯一の error classifier (status / JSON body を決める)
 * - RepoError / IdCodecError / TokenError / JSON・Path rejection を From で統一的に変換
 */
use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;
use crate::services::password::PasswordError;

/// Field name -> human readable detail.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformatted id")]
    MalformedId,
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),
    #[error("duplicate value for `{field}`")]
    DuplicateKey { field: &'static str },
    #[error("{resource} not found")]
    MissingEntity { resource: &'static str },
    #[error("token invalid")]
    InvalidToken,
    #[error("unauthenticated: {reason}")]
    Unauthenticated { reason: &'static str },
    #[error("forbidden: {reason}")]
    Forbidden { reason: &'static str },
    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<E: Serialize> {
    error: E,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn respond<E: Serialize>(status: StatusCode, error: E, message: Option<String>) -> Response {
    (status, Json(ErrorResponse { error, message })).into_response()
}

impl AppError {
    pub fn validation(field: &'static str, detail: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field, detail.into());
        Self::Validation(errors)
    }

    pub fn missing(resource: &'static str) -> Self {
        Self::MissingEntity { resource }
    }

    pub fn unauthenticated(reason: &'static str) -> Self {
        Self::Unauthenticated { reason }
    }

    pub fn forbidden(reason: &'static str) -> Self {
        Self::Forbidden { reason }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedId
            | AppError::Validation(_)
            | AppError::DuplicateKey { .. }
            | AppError::MissingEntity { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::MalformedId => respond(
                status,
                "malformatted_id",
                Some("Malformatted id.".to_string()),
            ),
            AppError::Validation(fields) => respond(status, fields, None),
            AppError::DuplicateKey { field } => respond(
                status,
                "duplicate_key",
                Some(format!("expected `{field}` to be unique")),
            ),
            AppError::MissingEntity { resource } => respond(
                status,
                "missing_entity",
                Some(format!("{resource} not found")),
            ),
            AppError::InvalidToken => respond(status, "token invalid", None),
            AppError::Unauthenticated { reason } | AppError::Forbidden { reason } => {
                respond(status, reason, None)
            }
            // Unclassified: the server's plain 500, no body.
            AppError::Internal => status.into_response(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict { field } => AppError::DuplicateKey { field },
            RepoError::Db(err) => {
                tracing::error!(error = %err, "store operation failed");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        if e.is_client_error() {
            // Client supplied a malformed public id (e.g. /blogs/{id})
            AppError::MalformedId
        } else {
            tracing::error!(error = %e, "id codec failure");
            AppError::Internal
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::MalformedId
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    async fn classify(err: AppError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn malformed_id_is_400_with_error_and_message() {
        let (status, body) = classify(AppError::MalformedId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "malformatted_id", "message": "Malformatted id."})
        );
    }

    #[tokio::test]
    async fn validation_is_400_with_field_level_detail() {
        let mut fields = FieldErrors::new();
        fields.insert("url", "url is required".to_string());
        fields.insert("title", "title is required".to_string());

        let (status, body) = classify(AppError::Validation(fields)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"title": "title is required", "url": "url is required"}})
        );
    }

    #[tokio::test]
    async fn duplicate_key_is_400() {
        let (status, body) = classify(AppError::DuplicateKey { field: "username" }).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "duplicate_key");
        assert_eq!(body["message"], "expected `username` to be unique");
    }

    #[tokio::test]
    async fn missing_entity_is_400() {
        let (status, body) = classify(AppError::missing("blog")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "missing_entity", "message": "blog not found"})
        );
    }

    #[tokio::test]
    async fn auth_failures_are_401_without_message() {
        let (status, body) = classify(AppError::InvalidToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "token invalid"}));

        let (status, body) = classify(AppError::unauthenticated("token missing")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "token missing"}));
    }

    #[tokio::test]
    async fn forbidden_is_403() {
        let (status, body) = classify(AppError::forbidden("not the owner")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"error": "not the owner"}));
    }

    #[tokio::test]
    async fn unclassified_falls_back_to_plain_500() {
        let (status, body) = classify(AppError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn repo_conflict_becomes_duplicate_key() {
        let err: AppError = RepoError::Conflict { field: "username" }.into();
        assert!(matches!(err, AppError::DuplicateKey { field: "username" }));
    }

    #[test]
    fn malformed_public_id_becomes_malformed_id() {
        let err: AppError = IdCodecError::Malformed.into();
        assert!(matches!(err, AppError::MalformedId));

        let err: AppError = IdCodecError::NegativeId { value: -3 }.into();
        assert!(matches!(err, AppError::Internal));
    }
}
