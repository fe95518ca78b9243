//! Mock fetcher for testing.
//!
//! Provides a configurable mock implementation of the ResourceFetcher trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::ResourceFetcher;

/// Canned response for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status(u16),
    NetworkError(String),
}

/// Mock fetcher for testing.
///
/// Serves canned bodies by exact URL. Unknown URLs answer HTTP 404.
///
/// # Example
///
/// ```rust
/// use purge::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_body("https://example.com/", "<main></main>")
///     .with_status("https://example.com/gone.css", 410);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    /// Canned responses indexed by URL
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    /// Requested URLs, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn add_body(&self, url: impl Into<String>, body: impl Into<String>) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Body(body.into()));
    }

    /// Answer `url` with a non-success status.
    pub fn add_status(&self, url: impl Into<String>, status: u16) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Status(status));
    }

    /// Fail `url` as if the network were unreachable.
    pub fn add_network_error(&self, url: impl Into<String>, message: impl Into<String>) {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::NetworkError(message.into()));
    }

    /// Serve `body` for `url` (builder pattern).
    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_body(url, body);
        self
    }

    /// Answer `url` with `status` (builder pattern).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.add_status(url, status);
        self
    }

    /// Fail `url` with a network error (builder pattern).
    pub fn with_network_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_network_error(url, message);
        self
    }

    /// Get the number of fetch calls.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the requested URLs, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of times `url` was requested.
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|u| *u == url).count()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        let response = self.responses.read().unwrap().get(url).cloned();

        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Some(MockResponse::NetworkError(message)) => Err(FetchError::Request {
                url: url.to_string(),
                source: message.into(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
