//! Typed errors for the purge library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! terminal request failures apart from per-resource ones.

use thiserror::Error;

/// Errors that abort a whole purge request.
#[derive(Debug, Error)]
pub enum PurgeError {
    /// The page itself could not be fetched
    #[error("failed to fetch page: {0}")]
    PageFetch(#[source] FetchError),

    /// The document has no main container or no stylesheet links
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PurgeError {
    /// Fixed, user-facing message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            PurgeError::PageFetch(_) => "Error fetching HTML.",
            PurgeError::Extract(ExtractError::NoMainContainer) => "<main> element not found.",
            PurgeError::Extract(ExtractError::NoStylesheets) => "No CSS files found.",
            PurgeError::Extract(ExtractError::Document(_)) => "Internal error.",
        }
    }

    /// Whether the failure was caused by the submitted page rather than by
    /// the service's own configuration.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PurgeError::Extract(ExtractError::Document(_)))
    }
}

/// Errors raised while reading structure out of a parsed document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No element matched the main content selector
    #[error("main content container not found")]
    NoMainContainer,

    /// The document references no stylesheets at all
    #[error("no stylesheet links found")]
    NoStylesheets,

    /// A configured selector could not be used
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

/// Errors from the document model.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Selector string failed to parse
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Errors that can occur while fetching a single resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("invalid URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Network-level failure (DNS, connect, TLS, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body could not be read as text
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    /// The URL this failure belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Errors from reducing one stylesheet against one section.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// The stylesheet has content but not a single readable rule
    #[error("malformed stylesheet at {line}:{column}: {reason}")]
    Malformed { line: u32, column: u32, reason: String },

    /// A concurrent reduction task panicked or was cancelled
    #[error("reduction task failed: {0}")]
    Task(String),
}

/// Errors from the artifact store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Artifact name would escape the storage root
    #[error("unsafe artifact name: {0}")]
    UnsafeName(String),

    /// Underlying I/O failed
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for whole-request operations.
pub type Result<T> = std::result::Result<T, PurgeError>;

/// Result type alias for single-resource fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for document structure extraction.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for stylesheet reduction.
pub type ReduceResult<T> = std::result::Result<T, ReduceError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_match_terminal_failures() {
        let fetch = PurgeError::PageFetch(FetchError::Status {
            url: "https://example.com".into(),
            status: 500,
        });
        assert_eq!(fetch.user_message(), "Error fetching HTML.");
        assert!(fetch.is_client_error());

        let no_main = PurgeError::from(ExtractError::NoMainContainer);
        assert_eq!(no_main.user_message(), "<main> element not found.");

        let no_css = PurgeError::from(ExtractError::NoStylesheets);
        assert_eq!(no_css.user_message(), "No CSS files found.");
    }

    #[test]
    fn test_invalid_selector_is_not_a_client_error() {
        let err = PurgeError::from(ExtractError::from(DocumentError::InvalidSelector {
            selector: "main[".into(),
            reason: "unexpected end".into(),
        }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_fetch_error_carries_url() {
        let err = FetchError::Status {
            url: "https://example.com/a.css".into(),
            status: 404,
        };
        assert_eq!(err.url(), "https://example.com/a.css");
        assert_eq!(err.to_string(), "https://example.com/a.css returned HTTP 404");
    }
}
