//! Fetcher implementations.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - a single `reqwest` GET per call
//! - `MockFetcher` - canned bodies, for testing
//!
//! # Example
//!
//! ```rust,ignore
//! use purge::fetchers::{HttpFetcher, ResourceFetcher};
//!
//! let html = HttpFetcher::new().fetch("https://example.com").await?;
//! ```

mod http;
mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::ResourceFetcher;
