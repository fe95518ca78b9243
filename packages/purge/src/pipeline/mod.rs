//! Purge pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Page fetch
//! - Section extraction from the main container
//! - Stylesheet discovery and fetch
//! - Per-section reduction (sequential or concurrent)
//! - Artifact persistence

pub mod orchestrate;
pub mod reduce;
pub mod sections;
pub mod stylesheets;

pub use orchestrate::PurgePipeline;
pub use reduce::{reduce_section, reduce_sections, reduce_sections_concurrently};
pub use sections::extract_sections;
pub use stylesheets::{discover_stylesheets, fetch_stylesheets, resolve_reference};
