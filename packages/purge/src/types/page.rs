//! Page types - the incoming request and the fetched document.

use serde::{Deserialize, Serialize};

/// A request to purge one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// URL of the page to process
    pub url: String,
}

impl PageRequest {
    /// Create a new request for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Raw HTML of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// URL the document was fetched from; also the base for relative links
    pub source_url: String,

    /// Response body
    pub html: String,
}

impl FetchedDocument {
    /// Create a fetched document.
    pub fn new(source_url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            html: html.into(),
        }
    }
}
