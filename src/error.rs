use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::jwt::TokenError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingField(&'static str),

    #[error("User already exists")]
    DuplicateAccount,

    /// Login against an email nobody registered.
    #[error("User not found")]
    AccountNotFound,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("{0}")]
    InvalidId(&'static str),

    #[error("Invalid date format")]
    InvalidDate,

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    UploadRejected(String),

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            message,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::DuplicateAccount
            | AppError::AccountNotFound
            | AppError::InvalidCredentials
            | AppError::InvalidId(_)
            | AppError::InvalidDate
            | AppError::Invalid(_)
            | AppError::UploadRejected(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Unauthorized => return status.into_response(),
            AppError::Internal { message, source } => {
                error!(error = ?source, "{message}");
            }
            _ => {}
        }
        let body = ErrorBody {
            error: true,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Invalid(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, Vec<u8>) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn unauthorized_has_no_body() {
        let (status, body) = body_of(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_carry_message_envelope() {
        let (status, body) = body_of(AppError::MissingField("Position is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "Position is required");
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_source() {
        let err = AppError::internal(
            "Failed to retrieve users",
            anyhow::anyhow!("connection refused: 10.0.0.3:5432"),
        );
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("Failed to retrieve users"));
        assert!(!text.contains("10.0.0.3"));
    }

    #[test]
    fn not_found_variants_map_to_route_specific_status() {
        assert_eq!(AppError::AccountNotFound.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("User not found").status(),
            StatusCode::NOT_FOUND
        );
    }
}
