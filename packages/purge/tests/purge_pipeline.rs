//! Integration tests for the purge pipeline.
//!
//! These tests drive `PurgePipeline::run` end to end:
//! 1. Fetch the page (mocked)
//! 2. Extract sections and stylesheet links
//! 3. Fetch and reduce each stylesheet per section
//! 4. Persist artifacts (memory or filesystem)

use std::sync::Arc;

use proptest::prelude::*;
use purge::{
    testing::FailingReducer, ExtractError, FileStore, MemoryStore, MockFetcher, Outcome,
    PageRequest, PurgeConfig, PurgeError, PurgePipeline, ReductionMode, ResourceId,
    SelectorPurger,
};

const PAGE: &str = "https://shop.example.com/landing";

/// Helper to build a page with the given stylesheet hrefs and main content.
fn page(hrefs: &[&str], main: &str) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<link rel="stylesheet" href="{href}">"#))
        .collect();
    format!("<!doctype html><html><head>{links}</head><body><main>{main}</main></body></html>")
}

/// Helper to set up a pipeline over a shared memory store.
fn setup(fetcher: &MockFetcher) -> (PurgePipeline, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (PurgePipeline::new(fetcher.clone(), Arc::clone(&store)), store)
}

#[tokio::test]
async fn test_two_sections_one_stylesheet() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/css/site.css"], r#"<section id="a"></section><section id="b"></section>"#))
        .with_body("https://shop.example.com/css/site.css", "#a{color:red}#b{color:blue}");
    let (pipeline, store) = setup(&fetcher);

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    let ids: Vec<_> = report.artifacts.iter().map(|a| a.section_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(store.get("section-a.css").as_deref(), Some("#a{color:red}"));
    assert_eq!(store.get("section-b.css").as_deref(), Some("#b{color:blue}"));
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_contributions_follow_link_order() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/one.css", "/two.css"], r#"<div id="a"></div>"#))
        .with_body("https://shop.example.com/one.css", "#a{margin:0}")
        .with_body("https://shop.example.com/two.css", "#a{padding:0}");
    let (pipeline, store) = setup(&fetcher);

    pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert_eq!(store.get("section-a.css").as_deref(), Some("#a{margin:0}\n#a{padding:0}"));
}

#[tokio::test]
async fn test_duplicate_links_duplicate_contributions() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/one.css", "/one.css"], r#"<div id="a"></div>"#))
        .with_body("https://shop.example.com/one.css", "#a{margin:0}");
    let (pipeline, store) = setup(&fetcher);

    pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert_eq!(store.get("section-a.css").as_deref(), Some("#a{margin:0}\n#a{margin:0}"));
    assert_eq!(fetcher.calls_to("https://shop.example.com/one.css"), 2);
}

#[tokio::test]
async fn test_unmatched_section_gets_no_artifact() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/site.css"], r#"<div id="a"></div><div id="quiet"></div>"#))
        .with_body("https://shop.example.com/site.css", "#a{color:red}");
    let (pipeline, store) = setup(&fetcher);

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert!(report.artifact("quiet").is_none());
    assert!(store.get("section-quiet.css").is_none());
    assert_eq!(store.artifact_count(), 1);
}

#[tokio::test]
async fn test_empty_main_succeeds_with_no_artifacts() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/site.css"], "<p>no identified children</p>"))
        .with_body("https://shop.example.com/site.css", "p{color:red}");
    let (pipeline, store) = setup(&fetcher);

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(store.artifact_count(), 0);
}

#[tokio::test]
async fn test_missing_main_is_terminal() {
    let fetcher = MockFetcher::new().with_body(
        PAGE,
        r#"<html><head><link rel="stylesheet" href="/site.css"></head><body></body></html>"#,
    );
    let (pipeline, store) = setup(&fetcher);

    let err = pipeline.run(&PageRequest::new(PAGE)).await.unwrap_err();

    assert!(matches!(err, PurgeError::Extract(ExtractError::NoMainContainer)));
    assert_eq!(err.user_message(), "<main> element not found.");
    assert_eq!(store.artifact_count(), 0);
    // No stylesheet is fetched once the page is rejected.
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn test_no_links_is_terminal() {
    let fetcher = MockFetcher::new().with_body(PAGE, page(&[], r#"<div id="a"></div>"#));
    let (pipeline, _store) = setup(&fetcher);

    let err = pipeline.run(&PageRequest::new(PAGE)).await.unwrap_err();

    assert!(matches!(err, PurgeError::Extract(ExtractError::NoStylesheets)));
}

#[tokio::test]
async fn test_every_link_failing_is_not_terminal() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/gone.css"], r#"<div id="a"></div>"#))
        .with_network_error("https://shop.example.com/gone.css", "connection reset");
    let (pipeline, store) = setup(&fetcher);

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert!(report.artifacts.is_empty());
    assert_eq!(store.artifact_count(), 0);
    let failure = report.failures().next().unwrap();
    assert_eq!(
        failure.resource,
        ResourceId::Stylesheet {
            url: "https://shop.example.com/gone.css".into()
        }
    );
}

#[tokio::test]
async fn test_page_fetch_status_failure() {
    let fetcher = MockFetcher::new().with_status(PAGE, 500);
    let (pipeline, _store) = setup(&fetcher);

    let err = pipeline.run(&PageRequest::new(PAGE)).await.unwrap_err();

    assert_eq!(err.user_message(), "Error fetching HTML.");
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_failed_reduction_drops_only_that_pair() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/one.css", "/two.css"], r#"<div id="a"></div>"#))
        .with_body("https://shop.example.com/one.css", "#a{margin:0}")
        .with_body("https://shop.example.com/two.css", "#a{padding:0}");
    let (pipeline, store) = setup(&fetcher);
    let pipeline = pipeline.with_reducer(FailingReducer::new(SelectorPurger).failing_on("#a{margin:0}"));

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert_eq!(store.get("section-a.css").as_deref(), Some("#a{padding:0}"));
    let failed: Vec<_> = report.failures().map(|o| o.resource.clone()).collect();
    assert_eq!(
        failed,
        vec![ResourceId::Reduction {
            section_id: "a".into(),
            stylesheet_url: "https://shop.example.com/one.css".into()
        }]
    );
}

#[tokio::test]
async fn test_sections_are_isolated() {
    let css = "#a{color:red} #b{color:blue} #a .title{font-weight:700} #b p{margin:0}";
    let fetcher = MockFetcher::new()
        .with_body(
            PAGE,
            page(
                &["/site.css"],
                r#"<div id="a"><h2 class="title">A</h2></div><div id="b"><p>B</p></div>"#,
            ),
        )
        .with_body("https://shop.example.com/site.css", css);
    let (pipeline, store) = setup(&fetcher);

    pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    let a = store.get("section-a.css").unwrap();
    let b = store.get("section-b.css").unwrap();
    assert_eq!(a, "#a{color:red}\n#a .title{font-weight:700}");
    assert_eq!(b, "#b{color:blue}\n#b p{margin:0}");
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/site.css"], r#"<div id="a"></div><div id="b"></div>"#))
        .with_body("https://shop.example.com/site.css", "#a{color:red}#b{color:blue}");
    let (pipeline, store) = setup(&fetcher);

    let first = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();
    let snapshot: Vec<_> = store.names().into_iter().map(|n| (store.get(&n), n)).collect();

    let second = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();
    let again: Vec<_> = store.names().into_iter().map(|n| (store.get(&n), n)).collect();

    assert_eq!(first, second);
    assert_eq!(snapshot, again);
    assert_eq!(store.write_log().len(), 4);
}

#[tokio::test]
async fn test_concurrent_mode_matches_sequential() {
    let fetcher = MockFetcher::new()
        .with_body(
            PAGE,
            page(
                &["/one.css", "/two.css", "/three.css"],
                r#"<div id="a" class="card"></div><div id="b"><span></span></div><div id="c"></div>"#,
            ),
        )
        .with_body("https://shop.example.com/one.css", "#a{x:1}#b{x:2}.card{x:3}")
        .with_body("https://shop.example.com/two.css", "span{y:1}#c{y:2}")
        .with_status("https://shop.example.com/three.css", 404);

    let (sequential, sequential_store) = setup(&fetcher);
    let (concurrent, concurrent_store) = setup(&fetcher);
    let concurrent = concurrent.with_config(PurgeConfig::new().with_reduction_mode(ReductionMode::Concurrent));

    let a = sequential.run(&PageRequest::new(PAGE)).await.unwrap();
    let b = concurrent.run(&PageRequest::new(PAGE)).await.unwrap();

    assert_eq!(a, b);
    for name in sequential_store.names() {
        assert_eq!(sequential_store.get(&name), concurrent_store.get(&name));
    }
    assert_eq!(sequential_store.names(), concurrent_store.names());
}

#[tokio::test]
async fn test_report_outcome_counts() {
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/one.css", "/blank.css"], r#"<div id="a"></div><div id="b"></div>"#))
        .with_body("https://shop.example.com/one.css", "#a{x:1}")
        .with_body("https://shop.example.com/blank.css", "");
    let (pipeline, _store) = setup(&fetcher);

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    // two stylesheets, one reducer-eligible stylesheet × two sections, one artifact
    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(
        report.outcomes.iter().filter(|o| o.outcome == Outcome::Empty).count(),
        2
    );
}

#[tokio::test]
async fn test_file_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("public");
    let fetcher = MockFetcher::new()
        .with_body(PAGE, page(&["/site.css"], r#"<section id="hero"></section>"#))
        .with_body("https://shop.example.com/site.css", "#hero{height:100vh}");
    let pipeline = PurgePipeline::new(fetcher, FileStore::new(&root));

    let report = pipeline.run(&PageRequest::new(PAGE)).await.unwrap();

    assert_eq!(report.artifacts[0].public_path, "/section-hero.css");
    let written = std::fs::read_to_string(root.join("section-hero.css")).unwrap();
    assert_eq!(written, "#hero{height:100vh}");
}

proptest! {
    #[test]
    fn prop_each_section_gets_exactly_its_own_rule(
        ids in prop::collection::btree_set("[a-z][a-z0-9]{0,6}", 1..6)
    ) {
        let main: String = ids.iter().map(|id| format!(r#"<div id="{id}"></div>"#)).collect();
        let mut css: String = ids.iter().map(|id| format!("#{id}{{order:1}}")).collect();
        css.push_str("#not-on-page{order:2}");

        let fetcher = MockFetcher::new()
            .with_body(PAGE, page(&["/site.css"], &main))
            .with_body("https://shop.example.com/site.css", css);
        let (pipeline, store) = setup(&fetcher);

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let report = runtime.block_on(pipeline.run(&PageRequest::new(PAGE))).unwrap();

        prop_assert_eq!(report.artifacts.len(), ids.len());
        for id in &ids {
            let written = store.get(&format!("section-{id}.css"));
            prop_assert_eq!(written, Some(format!("#{id}{{order:1}}")));
        }
    }
}
