//! Shared test utilities and fixtures.

#![allow(dead_code)]

use litesearch::testing::RecordingHost;
use litesearch::{Controller, Document, SearchConfig, WidgetEvent};

// Re-export canonical test utilities from litesearch::testing
pub use litesearch::testing::{install_guide_index, make_doc, MODAL_LISTENERS};

pub type TestController = Controller<RecordingHost>;

// ============================================================================
// FIXTURES
// ============================================================================

/// A small documentation site: sectioned titles, content bodies, one
/// document without a description.
pub fn docs_site() -> Vec<Document> {
    vec![
        make_doc("Docs|Install Guide", "How to install", "/docs/install")
            .with("content", "Download the archive, unpack it and run the installer."),
        make_doc("Docs|Configuration", "Every option explained", "/docs/config")
            .with("content", "Set dataPath to the location of your index file."),
        make_doc("Blog|Release notes", "What changed in 0.3", "/blog/release")
            .with("content", "The installer now verifies checksums before unpacking."),
        Document::new()
            .with("title", "Changelog")
            .with("url", "/changelog"),
    ]
}

/// `n` documents whose titles all contain `word`.
pub fn repeated_corpus(word: &str, n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| make_doc(&format!("{} {}", word, i), "generated", &format!("/{}", i)))
        .collect()
}

// ============================================================================
// CONTROLLER HELPERS
// ============================================================================

/// Controller with a recording host and an already-loaded index.
pub fn ready_controller(docs: Vec<Document>, config: SearchConfig) -> TestController {
    let mut controller = Controller::new(RecordingHost::new(), config);
    controller.index_loaded(Ok(docs));
    controller
}

/// Simulate typing `text` into the search input.
pub fn type_query(controller: &mut TestController, text: &str) {
    controller.host_mut().type_text(text);
    let _ = controller.handle(WidgetEvent::Input);
}
