//! HTTP-based fetcher implementation.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::ResourceFetcher;

/// Fetcher that issues a single HTTP GET per call.
///
/// No retries and no request timeout: a hanging server stalls the caller.
///
/// # Example
///
/// ```rust,ignore
/// use purge::fetchers::HttpFetcher;
///
/// let fetcher = HttpFetcher::new().with_user_agent("my-bot/1.0");
/// let css = fetcher.fetch("https://example.com/site.css").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: concat!("section-purge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Request {
                    url: url.to_string(),
                    source: Box::new(e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use tokio::net::TcpListener;

    /// Serve a small router on an ephemeral local port.
    async fn serve() -> String {
        let app = Router::new()
            .route("/site.css", get(|| async { "body{margin:0}" }))
            .route("/missing.css", get(|| async { StatusCode::NOT_FOUND }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_success_returns_body_text() {
        let base = serve().await;

        let body = HttpFetcher::new().fetch(&format!("{base}/site.css")).await.unwrap();
        assert_eq!(body, "body{margin:0}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let base = serve().await;
        let url = format!("{base}/missing.css");

        let err = HttpFetcher::new().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_closed_port_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::new()
            .fetch(&format!("http://{addr}/site.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_request() {
        let fetcher = HttpFetcher::new();

        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(err.url(), "not a url");
    }
}
