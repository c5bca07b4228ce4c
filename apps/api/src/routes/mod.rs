pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis pipeline
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/upload",
            post(handlers::handle_analyze_upload),
        )
        // Persisted artifacts
        .route(
            "/api/v1/profile/:analysis_id",
            get(handlers::handle_get_profile),
        )
        // Match scoring (recomputed per request, never cached)
        .route("/api/v1/match", post(handlers::handle_match))
        // Gap analysis + learning roadmap
        .route("/api/v1/roadmap", post(handlers::handle_roadmap))
        .with_state(state)
}
