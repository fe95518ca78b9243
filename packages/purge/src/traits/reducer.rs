//! Reduction capability trait.
//!
//! Given one markup fragment and one stylesheet body, a `CssReducer` returns
//! the stylesheet restricted to rules whose selectors match something in the
//! fragment. The pipeline treats it as a black box; `SelectorPurger` is the
//! default implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ReduceResult;

/// Restricts a stylesheet to the rules used by some markup.
#[async_trait]
pub trait CssReducer: Send + Sync {
    /// Reduce `css` against `markup`, evaluated as if it were a full
    /// document.
    ///
    /// Must be a pure function of its inputs.
    async fn reduce(&self, markup: &str, css: &str) -> ReduceResult<String>;
}

#[async_trait]
impl<T: CssReducer + ?Sized> CssReducer for Arc<T> {
    async fn reduce(&self, markup: &str, css: &str) -> ReduceResult<String> {
        (**self).reduce(markup, css).await
    }
}
