//! Section extraction - partition the main container into sections.

use scraper::ElementRef;
use tracing::debug;

use crate::document::{attr, child_elements, ParsedDocument};
use crate::error::{ExtractError, ExtractResult};
use crate::types::section::Section;

/// Locate the main container and return its identified direct children.
///
/// The first element matching `main_selector` is the container; none is
/// `ExtractError::NoMainContainer`. Children without a non-empty `id` are
/// skipped. An empty result is not an error.
pub fn extract_sections(document: &ParsedDocument, main_selector: &str) -> ExtractResult<Vec<Section>> {
    let main = find_main_container(document, main_selector)?;
    Ok(sections_of(main))
}

/// First element matching `main_selector`, in document order.
pub fn find_main_container<'a>(
    document: &'a ParsedDocument,
    main_selector: &str,
) -> ExtractResult<ElementRef<'a>> {
    document
        .select_one(main_selector)?
        .ok_or(ExtractError::NoMainContainer)
}

/// Direct children of `container` that carry a non-empty `id`.
pub fn sections_of(container: ElementRef<'_>) -> Vec<Section> {
    let mut skipped = 0usize;
    let sections: Vec<Section> = child_elements(container)
        .filter_map(|child| match attr(&child, "id") {
            Some(id) if !id.is_empty() => Some(Section::new(id, child.html())),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    debug!(
        sections = sections.len(),
        skipped, "Extracted sections from main container"
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ExtractResult<Vec<Section>> {
        extract_sections(&ParsedDocument::parse(html), "main")
    }

    #[test]
    fn test_identified_children_in_document_order() {
        let sections = extract(
            r#"<main>
                <section id="b"><p>B</p></section>
                <div>no id</div>
                <section id="a" class="x">A</section>
            </main>"#,
        )
        .unwrap();

        let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(sections[0].markup, r#"<section id="b"><p>B</p></section>"#);
        assert!(sections[1].markup.starts_with("<section "));
        assert!(sections[1].markup.contains(r#"class="x""#));
        assert!(sections[1].markup.ends_with(">A</section>"));
    }

    #[test]
    fn test_empty_id_is_skipped() {
        let sections = extract(r#"<main><div id="">x</div><div id="ok"></div></main>"#).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "ok");
    }

    #[test]
    fn test_grandchildren_are_not_sections() {
        let sections = extract(r#"<main><div><section id="deep"></section></div></main>"#).unwrap();

        assert!(sections.is_empty());
    }

    #[test]
    fn test_missing_main_container() {
        let err = extract(r#"<body><section id="a"></section></body>"#).unwrap_err();

        assert!(matches!(err, ExtractError::NoMainContainer));
    }

    #[test]
    fn test_first_main_wins() {
        let sections = extract(
            r#"<main><div id="first"></div></main><main><div id="second"></div></main>"#,
        )
        .unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "first");
    }

    #[test]
    fn test_container_lookup_is_separate_from_collection() {
        let doc = ParsedDocument::parse(r#"<main><p id="a"></p><p></p></main>"#);

        let main = find_main_container(&doc, "main").unwrap();
        assert_eq!(sections_of(main).len(), 1);
        assert!(matches!(
            find_main_container(&doc, "article"),
            Err(ExtractError::NoMainContainer)
        ));
    }

    #[test]
    fn test_custom_container_selector() {
        let doc = ParsedDocument::parse(r#"<div role="main"><article id="post"></article></div>"#);

        let sections = extract_sections(&doc, r#"[role="main"]"#).unwrap();
        assert_eq!(sections[0].id, "post");
    }
}
