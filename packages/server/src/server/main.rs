// Main entry point for API server

use anyhow::{Context, Result};
use purge::{FileStore, HttpFetcher, PurgeConfig, PurgePipeline};
use server_core::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,purge=debug,server_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Section CSS Purge API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        public_dir = %config.public_dir.display(),
        reduction_mode = ?config.reduction_mode,
        "Configuration loaded"
    );

    // Build pipeline
    let pipeline = PurgePipeline::new(HttpFetcher::new(), FileStore::new(&config.public_dir))
        .with_config(PurgeConfig::new().with_reduction_mode(config.reduction_mode));

    // Build application
    let app = build_app(AppState::new(pipeline), &config.public_dir);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Purge endpoint: POST http://localhost:{}/api/purge", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
