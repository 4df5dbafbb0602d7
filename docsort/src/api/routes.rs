use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/extract", post(handlers::extract_upload))
        .route("/classify", post(handlers::classify_upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
