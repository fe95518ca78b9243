//! Fetcher trait for retrieving pages and stylesheets.
//!
//! The pipeline never talks to the network directly; it goes through a
//! `ResourceFetcher` so tests can serve canned bodies.
//!
//! # Usage
//!
//! ```rust,ignore
//! use purge::traits::fetcher::ResourceFetcher;
//!
//! let html = fetcher.fetch("https://example.com").await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchResult;

/// Retrieves a resource body by URL.
///
/// One attempt per call: no retries, no caching, no timeout beyond whatever
/// the implementation's transport imposes.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    ///
    /// A network failure or non-success status is a `FetchError` carrying
    /// the URL.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

#[async_trait]
impl<T: ResourceFetcher + ?Sized> ResourceFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        (**self).fetch(url).await
    }
}
