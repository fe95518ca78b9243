//! Default reduction capability.
//!
//! `SelectorPurger` keeps the style rules whose selectors match at least one
//! element of the markup, evaluated as a full document:
//!
//! - unmatched selectors are pruned from a selector list; a rule left with
//!   none is removed
//! - `@media`, `@supports`, `@container`, `@document` and block `@layer`
//!   rules are reduced recursively and removed when empty
//! - other at-rules (`@font-face`, `@keyframes`, `@import`, ...) are kept
//!   verbatim
//! - a selector that cannot be evaluated is kept
//! - a rule `cssparser` cannot read is dropped on its own; a non-empty
//!   stylesheet with no readable rule at all is an error
//!
//! # Example
//!
//! ```rust
//! use purge::purge::purge_css;
//!
//! let css = purge_css(r#"<div id="a"></div>"#, "#a{color:red}#b{color:blue}").unwrap();
//! assert_eq!(css, "#a{color:red}");
//! ```

pub mod selector;
pub mod stylesheet;

use async_trait::async_trait;
use tracing::debug;

use crate::document::{parse_selector, ParsedDocument};
use crate::error::ReduceResult;
use crate::traits::reducer::CssReducer;

use selector::normalize_selector;
use stylesheet::{parse_items, CssItem};

/// At-rules whose body is a rule list filtered by the same markup.
const CONDITIONAL_GROUP_RULES: &[&str] = &["media", "supports", "container", "document", "-moz-document", "layer"];

/// Reducer backed by `scraper` selector matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorPurger;

impl SelectorPurger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CssReducer for SelectorPurger {
    async fn reduce(&self, markup: &str, css: &str) -> ReduceResult<String> {
        purge_css(markup, css)
    }
}

/// Restrict `css` to the rules used by `markup`.
pub fn purge_css(markup: &str, css: &str) -> ReduceResult<String> {
    let document = ParsedDocument::parse(markup);
    let kept = purge_block(&document, css)?;
    Ok(kept.join("\n"))
}

fn purge_block(document: &ParsedDocument, css: &str) -> ReduceResult<Vec<String>> {
    let mut kept = Vec::new();

    for item in parse_items(css)? {
        match item {
            CssItem::Style { selectors, body } => {
                let used: Vec<&str> = selectors
                    .into_iter()
                    .filter(|s| selector_is_used(document, s))
                    .collect();
                if !used.is_empty() {
                    kept.push(format!("{}{{{}}}", used.join(","), body));
                }
            }
            CssItem::AtBlock { name, prelude, body } => {
                let header = at_rule_header(&name, prelude);
                if is_conditional_group(&name) {
                    let inner = purge_block(document, body)?;
                    if !inner.is_empty() {
                        kept.push(format!("{}{{{}}}", header, inner.join("\n")));
                    }
                } else {
                    kept.push(format!("{}{{{}}}", header, body));
                }
            }
            CssItem::AtStatement { name, prelude } => {
                kept.push(format!("{};", at_rule_header(&name, prelude)));
            }
        }
    }

    Ok(kept)
}

fn is_conditional_group(name: &str) -> bool {
    CONDITIONAL_GROUP_RULES
        .iter()
        .any(|rule| rule.eq_ignore_ascii_case(name))
}

fn at_rule_header(name: &str, prelude: &str) -> String {
    if prelude.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name} {prelude}")
    }
}

fn selector_is_used(document: &ParsedDocument, selector: &str) -> bool {
    let normalized = normalize_selector(selector);
    match parse_selector(&normalized) {
        Ok(parsed) => document.matches_any(&parsed),
        Err(e) => {
            debug!(selector = %selector, error = %e, "Keeping selector that cannot be evaluated");
            true
        }
    }
}
