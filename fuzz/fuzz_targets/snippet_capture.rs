// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snippet extraction around content matches.
//!
//! Spans come from the engine in char offsets; the snippet window must stay
//! inside the field and inside the configured length for any span the
//! engine could report, including ones at the very edges.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use litesearch::{capture_context, Span};

#[derive(Debug, Arbitrary)]
struct SnippetInput {
    value: String,
    start: u16,
    len: u16,
    max_context_length: u16,
}

fuzz_target!(|input: SnippetInput| {
    let value: String = input.value.chars().take(2000).collect();
    let chars = value.chars().count();
    if chars == 0 {
        return;
    }

    let start = input.start as usize % chars;
    let end = (start + input.len as usize).min(chars);
    let max = input.max_context_length as usize;

    let snippet = capture_context(&value, Span::new(start, end), max);
    assert!(snippet.starts_with("...") && snippet.ends_with("..."));

    let window = snippet.chars().count() - 6;
    assert!(window <= max);
    assert!(window <= chars);
});
