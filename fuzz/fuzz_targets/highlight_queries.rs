// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query highlighting and the full search pipeline.
//!
//! Whatever lands in the search box, `c++`, `(draft`, a lone backslash or a
//! paste of binary garbage, must highlight literally and render escaped
//! markup.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use litesearch::utils::escape_html;
use litesearch::{build_highlighter, highlight, Document, SearchConfig, SearchPipeline};

#[derive(Debug, Arbitrary)]
struct HighlightInput {
    query: String,
    title: String,
    description: String,
}

fuzz_target!(|input: HighlightInput| {
    // Cap lengths to avoid timeouts
    let query: String = input.query.chars().take(64).collect();
    let title: String = input.title.chars().take(200).collect();
    let description: String = input.description.chars().take(400).collect();

    // Highlighting only ever adds <mark> around escaped text
    let re = build_highlighter(&query);
    let html = highlight(&title, re.as_ref());
    let stripped = html.replace("<mark>", "").replace("</mark>", "");
    assert_eq!(stripped, escape_html(&title));

    // The whole pipeline must survive the same input
    let docs = vec![Document::new()
        .with("title", &title)
        .with("description", &description)];
    let pipeline = SearchPipeline::new(docs, SearchConfig::default());
    for view in pipeline.run(&query).results() {
        assert!(!view.description.contains("<script"));
    }
});
