use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use purge::ReductionMode;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory generated CSS files are written to and served from
    pub public_dir: PathBuf,
    pub reduction_mode: ReductionMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            reduction_mode: match env::var("REDUCTION_MODE") {
                Ok(mode) => mode
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("REDUCTION_MODE must be `sequential` or `concurrent`")?,
                Err(_) => ReductionMode::default(),
            },
        })
    }
}
