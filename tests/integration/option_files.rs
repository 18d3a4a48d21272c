//! Widget options read from JSON files.

use std::fs;

use crate::common::{docs_site, ready_controller, type_query};
use litesearch::{ConfigError, MatchStrategy, SearchConfig};
use tempfile::TempDir;

fn read_options(json: &str) -> Result<SearchConfig, ConfigError> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, json).unwrap();
    SearchConfig::from_json(&fs::read_to_string(&path).unwrap())
}

#[test]
fn exact_strategy_from_file() {
    let config = read_options(r#"{ "matchStrategy": "exact", "maxResults": 5 }"#).unwrap();
    assert_eq!(config.match_strategy, MatchStrategy::Exact);

    let mut controller = ready_controller(docs_site(), config);
    // one transposition: fuzzy would match, exact must not
    type_query(&mut controller, "chnagelog");
    assert!(controller.host().results_html.contains("No results found."));
}

#[test]
fn section_titles_can_be_disabled() {
    let config = read_options(r#"{ "showSectionOnTitle": false }"#).unwrap();
    let mut controller = ready_controller(docs_site(), config);
    type_query(&mut controller, "configuration");

    let html = &controller.host().results_html;
    assert!(!html.contains(r#"class="section""#));
    assert!(html.contains("Docs|<mark>Configuration</mark>"));
}

#[test]
fn invalid_options_are_rejected() {
    assert!(matches!(
        read_options(r#"{ "keys": [] }"#),
        Err(ConfigError::NoKeys)
    ));
    assert!(matches!(
        read_options(r#"{ "keys": [{ "name": "title", "weight": -1 }] }"#),
        Err(ConfigError::InvalidWeight { .. })
    ));
    assert!(matches!(
        read_options(r#"{ "shortcut": "ctrl+k" }"#),
        Err(ConfigError::InvalidShortcut(_))
    ));
    assert!(matches!(
        read_options(r#"{ "dataPath": 3 }"#),
        Err(ConfigError::Parse(_))
    ));
}
