pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/extract", post(handlers::handle_extract))
        .route("/api/v1/resume/validate", post(handlers::handle_validate))
        .route("/api/v1/resume/empty", get(handlers::handle_empty))
        .route(
            "/api/v1/resume/completeness",
            post(handlers::handle_completeness),
        )
        .route(
            "/api/v1/resume/sections/:section/entries",
            post(handlers::handle_append_entry),
        )
        .route(
            "/api/v1/resume/sections/:section/entries/:id/remove",
            post(handlers::handle_remove_entry),
        )
        .with_state(state)
}
