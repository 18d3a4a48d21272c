//! Outcome-level properties of `SearchPipeline::run`.

use crate::common::{make_doc, repeated_corpus};
use litesearch::format::ResolvedFields;
use litesearch::{Alias, Document, SearchConfig, SearchOutcome, SearchPipeline};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words drawn from the first half of the alphabet.
fn low_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-m]{3,8}").unwrap()
}

/// Queries drawn from the other half, so they can never match `low_word`.
fn high_query() -> impl Strategy<Value = String> {
    prop::string::string_regex("[n-z]{4,10}").unwrap()
}

fn low_corpus() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec((low_word(), low_word()), 1..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (title, desc))| make_doc(&title, &desc, &format!("/{}", i)))
            .collect()
    })
}

const FIELD_NAMES: [&str; 7] = ["title", "description", "id", "url", "image", "name", "link"];

fn field_name() -> impl Strategy<Value = String> {
    prop::sample::select(FIELD_NAMES.to_vec()).prop_map(str::to_string)
}

fn random_doc() -> impl Strategy<Value = Document> {
    prop::collection::vec((field_name(), "[a-z/ ]{0,12}"), 0..8).prop_map(|fields| {
        let mut doc = Document::new();
        for (name, value) in fields {
            doc.insert(&name, &value);
        }
        doc
    })
}

fn alias_map() -> impl Strategy<Value = Vec<Alias>> {
    prop::collection::vec((field_name(), field_name()), 0..5).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(input, output)| Alias::new(&input, &output))
            .collect()
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_short_queries_prompt(
        min in 0usize..6,
        query in "[a-z]{0,6}",
        docs in low_corpus(),
    ) {
        prop_assume!(query.chars().count() <= min);
        let config = SearchConfig { min_input_length: min, ..SearchConfig::default() };
        let pipeline = SearchPipeline::new(docs, config);
        prop_assert_eq!(pipeline.run(&query), SearchOutcome::PromptForMoreInput);
    }

    #[test]
    fn prop_disjoint_queries_find_nothing(docs in low_corpus(), query in high_query()) {
        let pipeline = SearchPipeline::new(docs, SearchConfig::default());
        prop_assert_eq!(pipeline.run(&query), SearchOutcome::NoResults);
    }

    #[test]
    fn prop_results_truncate_to_max(max in 1usize..15, extra in 1usize..20) {
        let config = SearchConfig { max_results: max, ..SearchConfig::default() };
        let pipeline = SearchPipeline::new(repeated_corpus("install", max + extra), config);

        let outcome = pipeline.run("install");
        let views = outcome.results();
        prop_assert_eq!(views.len(), max);
        for (expected_rank, view) in views.iter().enumerate() {
            prop_assert_eq!(view.rank, expected_rank);
            let expected_url = format!("/{}", expected_rank);
            prop_assert_eq!(view.url.as_deref(), Some(expected_url.as_str()));
        }
    }

    #[test]
    fn prop_alias_substitution_idempotent(doc in random_doc(), aliases in alias_map()) {
        let once = ResolvedFields::resolve(&doc, &aliases);
        let mut twice = once.clone();
        twice.apply_aliases(&doc, &aliases);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_run_never_panics(docs in low_corpus(), query in "\\PC{0,12}") {
        let pipeline = SearchPipeline::new(docs, SearchConfig::default());
        let _ = pipeline.run(&query);
    }
}
