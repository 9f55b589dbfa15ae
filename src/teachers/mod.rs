pub mod dto;
pub mod handlers;
pub mod profile;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(handlers::account_routes(max_image_bytes))
        .merge(handlers::lookup_routes())
}
