//! API Routes
//!
//! Configures the Axum router with all file server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::{file_handler, health_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
/// - `GET /*path` - Serve a `.gif` or `.png` file by name
///
/// `GET /` is routed to the file handler too, which rejects it as a request
/// without a file name.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: one `info` line per response with method, URI, status and latency
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/", get(file_handler))
        .route("/*path", get(file_handler))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
