use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::AppError;

/// The teacher a request acts on behalf of, taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthTeacher {
    pub teacher_id: Uuid,
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthTeacher
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(reason = %e, "rejected bearer token");
            AppError::Token(e)
        })?;

        Ok(AuthTeacher {
            teacher_id: claims.sub,
            user_id: claims.user_id,
        })
    }
}
