//! Parsed HTML documents with CSS selector queries.
//!
//! A thin layer over `scraper`: parsing never fails (html5ever recovers
//! from malformed markup), and selection uses standard CSS selector
//! semantics.
//!
//! `ParsedDocument` is not `Send`; it has to be dropped before the caller
//! reaches its next await point.

use scraper::{ElementRef, Html, Selector};

use crate::error::DocumentError;

/// A parsed HTML document, owned by a single request.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// First element matching `selector`, in document order.
    pub fn select_one(&self, selector: &str) -> Result<Option<ElementRef<'_>>, DocumentError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next())
    }

    /// Every element matching `selector`, in document order.
    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, DocumentError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Check whether at least one element matches an already parsed selector.
    pub fn matches_any(&self, selector: &Selector) -> bool {
        self.html.select(selector).next().is_some()
    }
}

/// Parse a CSS selector, keeping the source text in the error.
pub fn parse_selector(selector: &str) -> Result<Selector, DocumentError> {
    Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Immediate child elements of `element`, in document order.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Value of `name` on `element`, if present.
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
