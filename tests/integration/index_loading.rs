//! Loading indexes from disk and feeding them to the controller.

use std::fs;

use crate::common::{ready_controller, type_query};
use litesearch::testing::RecordingHost;
use litesearch::{load_index_file, parse_index, Controller, LoadError, SearchConfig};
use tempfile::TempDir;

fn write_index(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("index.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn loaded_file_drives_the_widget() {
    let dir = TempDir::new().unwrap();
    let path = write_index(
        &dir,
        r#"[
            {"title": "Install Guide", "description": "How to install", "url": "/install"},
            {"title": "Changelog", "url": "/changelog"}
        ]"#,
    );

    let docs = load_index_file(&path).unwrap();
    let mut controller = ready_controller(docs, SearchConfig::default());
    type_query(&mut controller, "install");
    assert_eq!(controller.host().hrefs(), vec!["/install".to_string()]);
}

#[test]
fn scalar_fields_are_searchable_as_text() {
    let docs = parse_index(br#"[{"title": "Release", "version": 42, "draft": false, "tags": ["a"]}]"#)
        .unwrap();
    assert_eq!(docs[0].get("version"), Some("42"));
    assert_eq!(docs[0].get("draft"), Some("false"));
    assert_eq!(docs[0].get("tags"), None);
}

#[test]
fn empty_index_is_ready_but_finds_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir, "[]");

    let docs = load_index_file(&path).unwrap();
    let mut controller = ready_controller(docs, SearchConfig::default());
    assert_eq!(controller.index().label(), "ready");

    type_query(&mut controller, "anything");
    assert!(controller.host().results_html.contains("No results found."));
}

#[test]
fn malformed_file_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir, r#"{"title": "not an array"}"#);

    let loaded = load_index_file(&path);
    assert!(matches!(loaded, Err(LoadError::Parse(_))));

    let mut controller = Controller::new(RecordingHost::new(), SearchConfig::default());
    controller.index_loaded(loaded);
    assert_eq!(controller.index().label(), "failed");

    type_query(&mut controller, "title");
    assert!(!controller.is_open());
}

#[test]
fn missing_file_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let err = load_index_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}
