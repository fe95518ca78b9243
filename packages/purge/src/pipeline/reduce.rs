//! Per-section reduction - run every stylesheet against every section.
//!
//! Both schedules feed the same merge step, so the concatenation order and
//! the recorded outcomes do not depend on which one ran.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ReduceError, ReduceResult};
use crate::traits::reducer::CssReducer;
use crate::types::{
    report::{Outcome, PurgeReport, ResourceId},
    section::{ReducedCss, Section},
    stylesheet::StylesheetContent,
};

/// Reduce one section against every stylesheet, one at a time.
pub async fn reduce_section<R>(
    reducer: &R,
    section: &Section,
    stylesheets: &[StylesheetContent],
    report: &mut PurgeReport,
) -> ReducedCss
where
    R: CssReducer + ?Sized,
{
    let mut results = Vec::with_capacity(stylesheets.len());
    for stylesheet in stylesheets {
        results.push(reducer.reduce(&section.markup, &stylesheet.css).await);
    }
    merge(section, stylesheets, results, report)
}

/// Reduce every section sequentially, in section order.
pub async fn reduce_sections<R>(
    reducer: &R,
    sections: &[Section],
    stylesheets: &[StylesheetContent],
    report: &mut PurgeReport,
) -> Vec<ReducedCss>
where
    R: CssReducer + ?Sized,
{
    let mut reduced = Vec::with_capacity(sections.len());
    for section in sections {
        reduced.push(reduce_section(reducer, section, stylesheets, report).await);
    }
    reduced
}

/// Reduce every section×stylesheet pair as its own task.
///
/// Tasks are joined before merging; results are merged in section order and
/// stylesheet discovery order, not completion order.
pub async fn reduce_sections_concurrently(
    reducer: Arc<dyn CssReducer>,
    sections: &[Section],
    stylesheets: &[StylesheetContent],
    report: &mut PurgeReport,
) -> Vec<ReducedCss> {
    let mut handles = Vec::with_capacity(sections.len() * stylesheets.len());
    for section in sections {
        for stylesheet in stylesheets {
            let reducer = Arc::clone(&reducer);
            let markup = section.markup.clone();
            let css = stylesheet.css.clone();
            handles.push(tokio::spawn(async move { reducer.reduce(&markup, &css).await }));
        }
    }

    let mut joined = join_all(handles).await.into_iter().map(|joined| match joined {
        Ok(result) => result,
        Err(e) => Err(ReduceError::Task(e.to_string())),
    });

    sections
        .iter()
        .map(|section| {
            let results: Vec<_> = joined.by_ref().take(stylesheets.len()).collect();
            merge(section, stylesheets, results, report)
        })
        .collect()
}

/// Concatenate one section's reduction results in stylesheet order,
/// recording an outcome per pair.
fn merge(
    section: &Section,
    stylesheets: &[StylesheetContent],
    results: Vec<ReduceResult<String>>,
    report: &mut PurgeReport,
) -> ReducedCss {
    let mut reduced = ReducedCss::empty(&section.id);

    for (stylesheet, result) in stylesheets.iter().zip(results) {
        let resource = ResourceId::Reduction {
            section_id: section.id.clone(),
            stylesheet_url: stylesheet.url.clone(),
        };

        match result {
            Ok(css) if css.trim().is_empty() => report.record(resource, Outcome::Empty),
            Ok(css) => {
                reduced.append(&css);
                report.record(resource, Outcome::Ok);
            }
            Err(e) => {
                warn!(
                    section = %section.id,
                    stylesheet = %stylesheet.url,
                    error = %e,
                    "Failed to reduce stylesheet for section"
                );
                report.record(resource, Outcome::failed(&e));
            }
        }
    }

    debug!(section = %section.id, bytes = reduced.css.len(), "Reduced section CSS");
    reduced
}
