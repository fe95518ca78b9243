//! The purge pipeline - main entry point of the library.
//!
//! One request walks these stages, in order:
//!
//! `fetching_page → extracting_main_container → extracting_sections →
//! resolving_stylesheets → reducing_per_section → persisting → done`
//!
//! Any stage before reduction can end the request. From reduction on, a
//! failure only drops the contribution it belongs to.

use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;
use uuid::Uuid;

use crate::document::ParsedDocument;
use crate::error::{ExtractResult, PurgeError, Result};
use crate::purge::SelectorPurger;
use crate::traits::{fetcher::ResourceFetcher, reducer::CssReducer, store::ArtifactStore};
use crate::types::{
    config::{PurgeConfig, ReductionMode},
    page::{FetchedDocument, PageRequest},
    report::{Outcome, PersistedArtifact, PurgeReport, PurgeStage, ResourceId},
    section::{ReducedCss, Section},
    stylesheet::StylesheetRef,
};

use super::reduce::{reduce_sections, reduce_sections_concurrently};
use super::sections::{find_main_container, sections_of};
use super::stylesheets::{discover_stylesheets, fetch_stylesheets};

/// Everything read out of the page before any stylesheet is fetched.
struct PageStructure {
    sections: Vec<Section>,
    stylesheets: Vec<StylesheetRef>,
}

/// Fetches a page, splits its main container into sections and writes one
/// reduced stylesheet per section.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = PurgePipeline::new(HttpFetcher::new(), FileStore::new("public"));
///
/// let report = pipeline.run(&PageRequest::new("https://example.com")).await?;
/// for artifact in &report.artifacts {
///     println!("{} -> {}", artifact.section_id, artifact.public_path);
/// }
/// ```
pub struct PurgePipeline {
    fetcher: Arc<dyn ResourceFetcher>,
    reducer: Arc<dyn CssReducer>,
    store: Arc<dyn ArtifactStore>,
    config: PurgeConfig,
}

impl PurgePipeline {
    /// Create a pipeline with the default reducer and configuration.
    pub fn new(fetcher: impl ResourceFetcher + 'static, store: impl ArtifactStore + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            reducer: Arc::new(SelectorPurger::new()),
            store: Arc::new(store),
            config: PurgeConfig::default(),
        }
    }

    /// Replace the reduction capability.
    pub fn with_reducer(mut self, reducer: impl CssReducer + 'static) -> Self {
        self.reducer = Arc::new(reducer);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PurgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PurgeConfig {
        &self.config
    }

    /// Process one page request.
    ///
    /// Returns `Err` only for the terminal failures: the page could not be
    /// fetched, it has no main container, or it links no stylesheets. Every
    /// other failure is recorded in the report.
    pub async fn run(&self, request: &PageRequest) -> Result<PurgeReport> {
        let span = info_span!("purge", request_id = %Uuid::new_v4(), url = %request.url);
        self.run_inner(request).instrument(span).await
    }

    async fn run_inner(&self, request: &PageRequest) -> Result<PurgeReport> {
        let mut report = PurgeReport::new();

        enter(PurgeStage::FetchingPage);
        let html = self.fetcher.fetch(&request.url).await.map_err(|e| {
            warn!(error = %e, "Failed to fetch page");
            PurgeError::PageFetch(e)
        })?;
        let page = FetchedDocument::new(request.url.clone(), html);

        let structure = self.extract(&page)?;
        let sections = structure.sections;

        let stylesheets = fetch_stylesheets(self.fetcher.as_ref(), &structure.stylesheets, &mut report).await;

        enter(PurgeStage::ReducingPerSection);
        let reduced = match self.config.reduction_mode {
            ReductionMode::Sequential => {
                reduce_sections(self.reducer.as_ref(), &sections, &stylesheets, &mut report).await
            }
            ReductionMode::Concurrent => {
                reduce_sections_concurrently(Arc::clone(&self.reducer), &sections, &stylesheets, &mut report)
                    .await
            }
        };

        enter(PurgeStage::Persisting);
        for section in reduced {
            self.persist(section, &mut report).await;
        }

        enter(PurgeStage::Done);
        info!(
            sections = sections.len(),
            stylesheets = stylesheets.len(),
            artifacts = report.artifacts.len(),
            failures = report.failures().count(),
            "Purge complete"
        );

        Ok(report)
    }

    /// Read sections and stylesheet links out of the page.
    ///
    /// The parsed tree lives only inside this call.
    fn extract(&self, page: &FetchedDocument) -> ExtractResult<PageStructure> {
        let document = ParsedDocument::parse(&page.html);

        enter(PurgeStage::ExtractingMainContainer);
        let main = find_main_container(&document, &self.config.main_selector).map_err(|e| {
            warn!(stage = %PurgeStage::ExtractingMainContainer, error = %e, "Page rejected");
            e
        })?;

        enter(PurgeStage::ExtractingSections);
        let sections = sections_of(main);

        enter(PurgeStage::ResolvingStylesheets);
        let base_url = Url::parse(&page.source_url).ok();
        let stylesheets = discover_stylesheets(&document, &self.config.stylesheet_selector, base_url.as_ref())
            .map_err(|e| {
                warn!(stage = %PurgeStage::ResolvingStylesheets, error = %e, "Page rejected");
                e
            })?;

        Ok(PageStructure { sections, stylesheets })
    }

    /// Write one section's CSS, unless it is empty.
    async fn persist(&self, section: ReducedCss, report: &mut PurgeReport) {
        if section.is_empty() {
            debug!(section = %section.section_id, "No CSS for section; nothing written");
            return;
        }

        let file_name = self.config.artifact_file_name(&section.section_id);
        let resource = ResourceId::Artifact {
            section_id: section.section_id.clone(),
        };

        match self.store.write(&file_name, &section.css).await {
            Ok(()) => {
                debug!(section = %section.section_id, file = %file_name, "Wrote section CSS");
                report.record(resource, Outcome::Ok);
                report.artifacts.push(PersistedArtifact {
                    public_path: self.config.public_path(&file_name),
                    section_id: section.section_id,
                    file_name,
                });
            }
            Err(e) => {
                warn!(section = %section.section_id, file = %file_name, error = %e, "Failed to write section CSS");
                report.record(resource, Outcome::failed(&e));
            }
        }
    }
}

fn enter(stage: PurgeStage) {
    debug!(stage = %stage, "Entering stage");
}
