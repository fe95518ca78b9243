//! Stylesheet resolution - discover links, resolve them, fetch each one.
//!
//! Discovery walks the parsed tree synchronously; fetching is async and runs
//! after the tree has been dropped.

use tracing::{debug, warn};
use url::Url;

use crate::document::{attr, ParsedDocument};
use crate::error::{ExtractError, ExtractResult};
use crate::traits::fetcher::ResourceFetcher;
use crate::types::{
    report::{Outcome, PurgeReport, ResourceId},
    stylesheet::{StylesheetContent, StylesheetRef},
};

/// Find every stylesheet link, in document order, and resolve its `href`.
///
/// No matching link at all is `ExtractError::NoStylesheets`. A link whose
/// `href` is missing or unresolvable is returned as
/// `StylesheetRef::Unresolvable` and fails later, on its own.
pub fn discover_stylesheets(
    document: &ParsedDocument,
    link_selector: &str,
    base_url: Option<&Url>,
) -> ExtractResult<Vec<StylesheetRef>> {
    let links = document.select_all(link_selector)?;
    if links.is_empty() {
        return Err(ExtractError::NoStylesheets);
    }

    let refs: Vec<StylesheetRef> = links
        .iter()
        .map(|link| match attr(link, "href") {
            Some(href) => match resolve_reference(href, base_url) {
                Ok(resolved_url) => StylesheetRef::Resolved { resolved_url },
                Err(reason) => StylesheetRef::Unresolvable {
                    href: Some(href.to_string()),
                    reason,
                },
            },
            None => StylesheetRef::Unresolvable {
                href: None,
                reason: "link has no href".to_string(),
            },
        })
        .collect();

    debug!(links = refs.len(), "Discovered stylesheet links");
    Ok(refs)
}

/// Resolve a stylesheet reference against the page URL.
///
/// Absolute references pass through unchanged; scheme-relative and
/// path-relative ones are joined onto `base_url`.
pub fn resolve_reference(href: &str, base_url: Option<&Url>) -> Result<String, String> {
    let href = href.trim();
    if href.is_empty() {
        return Err("empty href".to_string());
    }

    match Url::parse(href) {
        Ok(_) => Ok(href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base_url.ok_or_else(|| format!("cannot resolve `{href}` without a base URL"))?;
            base.join(href)
                .map(|u| u.to_string())
                .map_err(|e| format!("cannot resolve `{href}`: {e}"))
        }
        Err(e) => Err(format!("invalid reference `{href}`: {e}")),
    }
}

/// Fetch each resolved stylesheet once per occurrence, in order.
///
/// Failures and empty bodies are recorded in `report` and left out of the
/// returned list. The list may be empty.
pub async fn fetch_stylesheets<F>(
    fetcher: &F,
    refs: &[StylesheetRef],
    report: &mut PurgeReport,
) -> Vec<StylesheetContent>
where
    F: ResourceFetcher + ?Sized,
{
    let mut contents = Vec::with_capacity(refs.len());

    for stylesheet in refs {
        let url = match stylesheet {
            StylesheetRef::Resolved { resolved_url } => resolved_url,
            StylesheetRef::Unresolvable { reason, .. } => {
                warn!(href = %stylesheet.label(), reason = %reason, "Skipping stylesheet link");
                report.record(
                    ResourceId::Stylesheet {
                        url: stylesheet.label().to_string(),
                    },
                    Outcome::Failed(reason.clone()),
                );
                continue;
            }
        };

        let resource = ResourceId::Stylesheet { url: url.clone() };
        match fetcher.fetch(url).await {
            Ok(css) if css.trim().is_empty() => {
                debug!(url = %url, "Stylesheet is empty");
                report.record(resource, Outcome::Empty);
            }
            Ok(css) => {
                report.record(resource, Outcome::Ok);
                contents.push(StylesheetContent::new(url.clone(), css));
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch stylesheet");
                report.record(resource, Outcome::failed(&e));
            }
        }
    }

    contents
}
