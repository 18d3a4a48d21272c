//! End-to-end scenarios: typed query in, injected markup out.

use crate::common::{docs_site, install_guide_index, ready_controller, type_query};
use litesearch::{KeyWeight, Match, MatchEngine, SearchConfig, SearchPipeline};

#[test]
fn install_query_renders_one_highlighted_result() {
    let mut controller = ready_controller(install_guide_index(), SearchConfig::default());
    type_query(&mut controller, "install");

    let host = controller.host();
    assert!(controller.is_open());
    assert_eq!(controller.result_count(), 1);
    assert_eq!(host.hrefs(), vec!["/install".to_string()]);
    assert!(host.results_html.contains("<p><mark>Install</mark> Guide</p>"));
    assert!(host.results_html.contains("<p>How to <mark>install</mark></p>"));
    assert!(host.results_html.contains(r#"tabindex="0""#));
}

#[test]
fn empty_query_renders_prompt() {
    let mut controller = ready_controller(install_guide_index(), SearchConfig::default());
    type_query(&mut controller, "");

    assert_eq!(
        controller.host().results_html,
        r#"<li class="warning">Type more to search.</li>"#
    );
    // nothing typed: the panel stays closed
    assert!(!controller.is_open());
}

#[test]
fn unmatched_query_renders_no_results() {
    let mut controller = ready_controller(install_guide_index(), SearchConfig::default());
    type_query(&mut controller, "zzz");

    assert!(controller.is_open());
    assert_eq!(controller.result_count(), 0);
    assert_eq!(
        controller.host().results_html,
        r#"<li class="warning">No results found.</li>"#
    );
}

#[test]
fn min_input_length_gates_short_queries() {
    let config = SearchConfig {
        min_input_length: 3,
        ..SearchConfig::default()
    };
    let mut controller = ready_controller(install_guide_index(), config);

    type_query(&mut controller, "ins");
    assert!(controller.host().results_html.contains("Type more to search."));

    type_query(&mut controller, "inst");
    assert_eq!(controller.result_count(), 1);
}

#[test]
fn sectioned_titles_render_section_and_title() {
    let mut controller = ready_controller(docs_site(), SearchConfig::default());
    type_query(&mut controller, "install guide");

    assert!(controller.host().results_html.contains(concat!(
        r#"<span class="section">Docs</span>"#,
        r#"<span class="separator">|</span>"#,
        r#"<span class="title"><mark>Install Guide</mark></span>"#
    )));
}

#[test]
fn missing_description_uses_placeholder() {
    let mut controller = ready_controller(docs_site(), SearchConfig::default());
    type_query(&mut controller, "changelog");

    assert_eq!(controller.host().hrefs(), vec!["/changelog".to_string()]);
    assert!(controller
        .host()
        .results_html
        .contains("<p>Item missing description.</p>"));
}

#[test]
fn content_matches_become_snippets() {
    let config = SearchConfig {
        keys: vec![KeyWeight::new("title", 3.0), KeyWeight::new("content", 1.0)],
        include_matches: true,
        max_context_length: 30,
        ..SearchConfig::default()
    };
    let mut controller = ready_controller(docs_site(), config);
    type_query(&mut controller, "checksums");

    let html = &controller.host().results_html;
    assert_eq!(controller.result_count(), 1);
    assert!(html.contains("<mark>checksums</mark>"));
    assert!(html.contains("<p>..."));
    assert!(!html.contains("What changed in 0.3"));
}

#[test]
fn document_text_is_escaped() {
    let docs = vec![litesearch::Document::new()
        .with("title", "<script>alert(1)</script> install")
        .with("url", "/x")];
    let mut controller = ready_controller(docs, SearchConfig::default());
    type_query(&mut controller, "install");

    let html = &controller.host().results_html;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

/// Ranks documents by index, last first.
struct NewestFirst(usize);

impl MatchEngine for NewestFirst {
    fn search(&self, _query: &str) -> Vec<Match> {
        (0..self.0)
            .rev()
            .map(|doc| Match {
                doc,
                score: 0.0,
                fields: Vec::new(),
            })
            .collect()
    }
}

#[test]
fn swapped_pipeline_renders_custom_engine_order() {
    let config = SearchConfig {
        max_results: 2,
        ..SearchConfig::default()
    };
    let mut controller = ready_controller(Vec::new(), config.clone());
    let docs = docs_site();
    let engine = NewestFirst(docs.len());
    controller.set_pipeline(SearchPipeline::with_engine(docs, Box::new(engine), config));
    type_query(&mut controller, "anything");

    assert_eq!(controller.result_count(), 2);
    assert_eq!(
        controller.host().hrefs(),
        vec!["/changelog".to_string(), "/blog/release".to_string()]
    );
}
