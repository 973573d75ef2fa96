pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::scan::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Page Not Found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Scan API
        .route(
            "/api/scan/match",
            post(handlers::handle_match).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .fallback(not_found)
        .with_state(state)
}
