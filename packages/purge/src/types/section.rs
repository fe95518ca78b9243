//! Sections of the main content container.

use serde::{Deserialize, Serialize};

/// An identified direct child of the main container.
///
/// A detached snapshot: `markup` is the element's outer HTML at extraction
/// time and has no tie back to the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Value of the element's `id` attribute (never empty)
    pub id: String,

    /// Serialized subtree, including the element itself
    pub markup: String,
}

impl Section {
    pub fn new(id: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: markup.into(),
        }
    }
}

/// CSS accumulated for one section across every stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedCss {
    pub section_id: String,
    pub css: String,
}

impl ReducedCss {
    /// Start an empty accumulation for a section.
    pub fn empty(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            css: String::new(),
        }
    }

    /// Append one stylesheet's reduction, in discovery order.
    ///
    /// Whitespace-only contributions are ignored; others are separated by a
    /// newline.
    pub fn append(&mut self, contribution: &str) {
        let contribution = contribution.trim();
        if contribution.is_empty() {
            return;
        }
        if !self.css.is_empty() {
            self.css.push('\n');
        }
        self.css.push_str(contribution);
    }

    pub fn is_empty(&self) -> bool {
        self.css.trim().is_empty()
    }
}
