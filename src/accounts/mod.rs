mod dto;
pub mod handlers;
pub mod policy;
pub mod repo;
pub mod repo_types;
pub mod services;
mod validation;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::public_routes())
        .merge(handlers::user_routes())
}
