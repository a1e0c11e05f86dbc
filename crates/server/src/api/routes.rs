use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::middleware::metrics_middleware;
use super::{handlers, members};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config().ingest.max_upload_bytes;

    // API routes
    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Fixed local rosters
        .route("/members/archive", get(members::read_archive))
        .route("/members/csv", get(members::read_csv))
        // Uploaded rosters
        .route("/members/upload", post(members::upload))
        .route("/members/upload/batched", post(members::upload_batched))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
