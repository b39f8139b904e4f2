pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod youtube;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::video_routes()
}
