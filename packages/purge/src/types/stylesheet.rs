//! Stylesheet references and fetched stylesheet bodies.

use serde::{Deserialize, Serialize};

/// One `<link>` occurrence in the document.
///
/// Occurrences are not deduplicated: the same URL linked twice yields two
/// refs and two fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylesheetRef {
    /// Reference resolved to an absolute URL
    Resolved { resolved_url: String },

    /// Link whose reference could not be turned into a URL
    Unresolvable { href: Option<String>, reason: String },
}

impl StylesheetRef {
    pub fn resolved(url: impl Into<String>) -> Self {
        StylesheetRef::Resolved {
            resolved_url: url.into(),
        }
    }

    /// Identifier used in outcome records and logs.
    pub fn label(&self) -> &str {
        match self {
            StylesheetRef::Resolved { resolved_url } => resolved_url,
            StylesheetRef::Unresolvable { href: Some(href), .. } => href,
            StylesheetRef::Unresolvable { href: None, .. } => "<link without href>",
        }
    }
}

/// A successfully fetched stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetContent {
    pub url: String,
    pub css: String,
}

impl StylesheetContent {
    pub fn new(url: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            css: css.into(),
        }
    }
}
