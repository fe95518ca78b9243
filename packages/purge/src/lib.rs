//! Per-Section CSS Purge Library
//!
//! Fetches a web page, splits its main content container into identified
//! sections, and writes one reduced stylesheet per section: only the rules
//! of the page's linked stylesheets that the section actually uses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use purge::{FileStore, HttpFetcher, PageRequest, PurgePipeline};
//!
//! let pipeline = PurgePipeline::new(HttpFetcher::new(), FileStore::new("public"));
//!
//! let report = pipeline.run(&PageRequest::new("https://example.com")).await?;
//! for artifact in &report.artifacts {
//!     println!("{} written to {}", artifact.section_id, artifact.public_path);
//! }
//! ```
//!
//! # Failure model
//!
//! A request fails as a whole only when the page cannot be fetched, has no
//! main container, or links no stylesheets. Everything after that (one
//! stylesheet, one reduction, one write) fails on its own and is recorded
//! in the [`PurgeReport`].
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ResourceFetcher, CssReducer, ArtifactStore)
//! - [`types`] - Data types (config, sections, stylesheets, report)
//! - [`pipeline`] - The purge pipeline and its stages
//! - [`purge`] - Default reducer backed by selector matching
//! - [`fetchers`] - Fetcher implementations (HttpFetcher, MockFetcher)
//! - [`stores`] - Artifact store implementations (FileStore, MemoryStore)
//! - [`testing`] - Mock implementations for testing

pub mod document;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod purge;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    DocumentError, ExtractError, FetchError, PurgeError, ReduceError, Result, StorageError,
};
pub use fetchers::{HttpFetcher, MockFetcher};
pub use pipeline::PurgePipeline;
pub use purge::SelectorPurger;
pub use stores::{FileStore, MemoryStore};
pub use traits::{fetcher::ResourceFetcher, reducer::CssReducer, store::ArtifactStore};
pub use types::{
    config::{PurgeConfig, ReductionMode},
    page::{FetchedDocument, PageRequest},
    report::{Outcome, PersistedArtifact, PurgeReport, PurgeStage, ResourceId, ResourceOutcome},
    section::{ReducedCss, Section},
    stylesheet::{StylesheetContent, StylesheetRef},
};
