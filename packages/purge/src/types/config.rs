//! Configuration for the purge pipeline.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selector locating the main content container.
pub const DEFAULT_MAIN_SELECTOR: &str = "main";

/// Selector locating stylesheet links.
pub const DEFAULT_STYLESHEET_SELECTOR: &str = r#"link[rel="stylesheet"]"#;

/// How reductions for one request are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionMode {
    /// One reduction at a time, section by section, stylesheet by stylesheet.
    #[default]
    Sequential,

    /// One task per section×stylesheet pair, joined before merging.
    ///
    /// Merge order still follows stylesheet discovery order.
    Concurrent,
}

impl FromStr for ReductionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ReductionMode::Sequential),
            "concurrent" => Ok(ReductionMode::Concurrent),
            other => Err(format!("unknown reduction mode: {other}")),
        }
    }
}

/// Configuration for the purge pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeConfig {
    /// Selector for the main content container.
    ///
    /// The first match in document order is used. Default: `main`.
    pub main_selector: String,

    /// Selector for stylesheet links.
    ///
    /// Default: `link[rel="stylesheet"]`.
    pub stylesheet_selector: String,

    /// Prefix of artifact file names. Default: `section-`.
    pub artifact_prefix: String,

    /// Extension of artifact file names, without the dot. Default: `css`.
    pub artifact_extension: String,

    /// Prefix joined with the file name to build the public path.
    ///
    /// Default: `/`.
    pub public_prefix: String,

    /// Reduction scheduling. Default: sequential.
    pub reduction_mode: ReductionMode,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            main_selector: DEFAULT_MAIN_SELECTOR.to_string(),
            stylesheet_selector: DEFAULT_STYLESHEET_SELECTOR.to_string(),
            artifact_prefix: "section-".to_string(),
            artifact_extension: "css".to_string(),
            public_prefix: "/".to_string(),
            reduction_mode: ReductionMode::Sequential,
        }
    }
}

impl PurgeConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main container selector.
    pub fn with_main_selector(mut self, selector: impl Into<String>) -> Self {
        self.main_selector = selector.into();
        self
    }

    /// Set the stylesheet link selector.
    pub fn with_stylesheet_selector(mut self, selector: impl Into<String>) -> Self {
        self.stylesheet_selector = selector.into();
        self
    }

    /// Set the public path prefix.
    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefix = prefix.into();
        self
    }

    /// Set the reduction mode.
    pub fn with_reduction_mode(mut self, mode: ReductionMode) -> Self {
        self.reduction_mode = mode;
        self
    }

    /// Deterministic artifact file name for a section id.
    pub fn artifact_file_name(&self, section_id: &str) -> String {
        format!(
            "{}{}.{}",
            self.artifact_prefix, section_id, self.artifact_extension
        )
    }

    /// Storage-root-relative public path for an artifact file name.
    pub fn public_path(&self, file_name: &str) -> String {
        if self.public_prefix.ends_with('/') {
            format!("{}{}", self.public_prefix, file_name)
        } else {
            format!("{}/{}", self.public_prefix, file_name)
        }
    }
}
