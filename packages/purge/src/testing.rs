//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the purge library
//! without real network or disk access. See also `fetchers::MockFetcher` and
//! `stores::MemoryStore`.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::error::{ReduceError, ReduceResult};
use crate::traits::reducer::CssReducer;

/// Reducer that fails on selected stylesheets and delegates the rest.
///
/// # Example
///
/// ```rust
/// use purge::purge::SelectorPurger;
/// use purge::testing::FailingReducer;
///
/// let reducer = FailingReducer::new(SelectorPurger).failing_on("#broken{}");
/// ```
pub struct FailingReducer<R> {
    inner: R,
    /// Stylesheet bodies that trigger a failure
    failing: HashSet<String>,
    /// Call tracking for assertions: (markup, css)
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl<R: CssReducer> FailingReducer<R> {
    /// Wrap `inner`; nothing fails until configured.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            failing: HashSet::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail whenever the stylesheet body equals `css`.
    pub fn failing_on(mut self, css: impl Into<String>) -> Self {
        self.failing.insert(css.into());
        self
    }

    /// Number of reduce calls seen.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl<R: CssReducer> CssReducer for FailingReducer<R> {
    async fn reduce(&self, markup: &str, css: &str) -> ReduceResult<String> {
        self.calls
            .write()
            .unwrap()
            .push((markup.to_string(), css.to_string()));

        if self.failing.contains(css) {
            return Err(ReduceError::Malformed {
                line: 1,
                column: 1,
                reason: "configured to fail".to_string(),
            });
        }
        self.inner.reduce(markup, css).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purge::SelectorPurger;

    #[tokio::test]
    async fn test_failing_reducer_delegates_and_fails() {
        let reducer = FailingReducer::new(SelectorPurger).failing_on("#x{}");

        assert!(reducer.reduce("<p id=x></p>", "#x{}").await.is_err());
        assert_eq!(
            reducer.reduce("<p id=x></p>", "#x{a:b}").await.unwrap(),
            "#x{a:b}"
        );
        assert_eq!(reducer.call_count(), 2);
    }
}
