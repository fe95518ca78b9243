//! Application setup and server configuration.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use purge::PurgePipeline;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::server::routes::{health_handler, purge_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PurgePipeline>,
}

impl AppState {
    pub fn new(pipeline: PurgePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the Axum application router
///
/// Generated files are served from `public_dir`, so every `url` returned by
/// the purge endpoint resolves against this same service.
pub fn build_app(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/purge", post(purge_handler))
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
