use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use tracing::instrument;

use super::services::presign_upload;
use crate::{error::AppError, state::AppState};

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads/*path", get(get_upload))
}

/// 307 to a presigned URL for a stored upload.
#[instrument(skip(state))]
pub async fn get_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Redirect, AppError> {
    let url = presign_upload(&state, &path).await?;
    Ok(Redirect::temporary(&url))
}
