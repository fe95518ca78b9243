//! Report types - persisted artifacts and per-resource outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The externally visible record of one written CSS file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    /// Section the CSS belongs to
    #[serde(rename = "id")]
    pub section_id: String,

    /// File name under the storage root
    #[serde(rename = "name")]
    pub file_name: String,

    /// Storage-root-relative public path
    #[serde(rename = "url")]
    pub public_path: String,
}

/// What a recorded outcome is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceId {
    /// Fetching one stylesheet link
    Stylesheet { url: String },

    /// Reducing one stylesheet against one section
    Reduction { section_id: String, stylesheet_url: String },

    /// Writing one section's artifact
    Artifact { section_id: String },
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Stylesheet { url } => write!(f, "stylesheet {url}"),
            ResourceId::Reduction {
                section_id,
                stylesheet_url,
            } => write!(f, "section {section_id} x {stylesheet_url}"),
            ResourceId::Artifact { section_id } => write!(f, "artifact for section {section_id}"),
        }
    }
}

/// How one resource fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Produced a contribution
    Ok,

    /// Succeeded but contributed nothing
    Empty,

    /// Failed; the contribution was dropped
    Failed(String),
}

impl Outcome {
    pub fn failed(err: impl fmt::Display) -> Self {
        Outcome::Failed(err.to_string())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// A `(resource, outcome)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOutcome {
    pub resource: ResourceId,
    pub outcome: Outcome,
}

impl ResourceOutcome {
    pub fn new(resource: ResourceId, outcome: Outcome) -> Self {
        Self { resource, outcome }
    }
}

/// Result of a purge request that got past every terminal check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    /// Written artifacts, in section-processing order
    pub artifacts: Vec<PersistedArtifact>,

    /// Every per-resource outcome, in the order it was recorded
    pub outcomes: Vec<ResourceOutcome>,
}

impl PurgeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome.
    pub fn record(&mut self, resource: ResourceId, outcome: Outcome) {
        self.outcomes.push(ResourceOutcome::new(resource, outcome));
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_failed())
    }

    /// Check whether every recorded step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Look up the artifact for a section.
    pub fn artifact(&self, section_id: &str) -> Option<&PersistedArtifact> {
        self.artifacts.iter().find(|a| a.section_id == section_id)
    }
}

/// Pipeline states, used for tracing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeStage {
    FetchingPage,
    ExtractingMainContainer,
    ExtractingSections,
    ResolvingStylesheets,
    ReducingPerSection,
    Persisting,
    Done,
}

impl fmt::Display for PurgeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurgeStage::FetchingPage => "fetching_page",
            PurgeStage::ExtractingMainContainer => "extracting_main_container",
            PurgeStage::ExtractingSections => "extracting_sections",
            PurgeStage::ResolvingStylesheets => "resolving_stylesheets",
            PurgeStage::ReducingPerSection => "reducing_per_section",
            PurgeStage::Persisting => "persisting",
            PurgeStage::Done => "done",
        };
        f.write_str(name)
    }
}
