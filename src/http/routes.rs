use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root and health check
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Transcripts
        .route(
            "/api/v1/transcripts",
            post(handlers::create_transcript).get(handlers::list_transcripts),
        )
        .route("/api/v1/transcripts/:id", get(handlers::get_transcript))
        .route(
            "/api/v1/transcripts/:id/resummarize",
            post(handlers::resummarize_transcript),
        )
        // Audit log
        .route("/api/v1/commlogs", get(handlers::list_commlogs))
        .route(
            "/api/v1/commlogs/transcript/:id",
            get(handlers::list_commlogs_for_transcript),
        )
        // Destructive utilities
        .route(
            "/api/v1/utils/clear-all-data",
            post(handlers::clear_all_data),
        )
        // Request logging, plus CORS for the browser frontend
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
