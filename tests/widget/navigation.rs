//! Keyboard navigation through rendered results.

use crate::common::{make_doc, ready_controller, repeated_corpus, type_query, TestController};
use litesearch::{Document, Focus, Key, Propagation, SearchConfig, WidgetEvent};

fn three_results() -> TestController {
    let mut controller = ready_controller(repeated_corpus("install", 3), SearchConfig::default());
    type_query(&mut controller, "install");
    assert_eq!(controller.result_count(), 3);
    controller
}

fn modal_key(controller: &mut TestController, key: Key) -> Propagation {
    let item = match controller.focus() {
        Focus::Result(index) => Some(index),
        _ => None,
    };
    controller.handle(WidgetEvent::ModalKey { key, item })
}

#[test]
fn results_keep_index_order_on_ties() {
    let controller = three_results();
    assert_eq!(
        controller.host().hrefs(),
        vec!["/0".to_string(), "/1".to_string(), "/2".to_string()]
    );
}

#[test]
fn wasd_alternates_match_arrows() {
    let mut controller = three_results();
    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    assert_eq!(controller.focus(), Focus::Result(0));

    let _ = modal_key(&mut controller, Key::Char('s'));
    assert_eq!(controller.focus(), Focus::Result(1));
    let _ = modal_key(&mut controller, Key::Char('s'));
    assert_eq!(controller.focus(), Focus::Result(2));
    let _ = modal_key(&mut controller, Key::Char('w'));
    assert_eq!(controller.focus(), Focus::Result(1));
    assert!(controller.host().is_selected(1));
    assert!(!controller.host().is_selected(2));

    let _ = modal_key(&mut controller, Key::Char('d'));
    assert_eq!(controller.host().navigated.as_deref(), Some("/1"));
}

#[test]
fn backspace_returns_to_input() {
    let mut controller = three_results();
    let _ = controller.handle(WidgetEvent::InputKey(Key::Enter));
    let _ = modal_key(&mut controller, Key::ArrowDown);
    assert_eq!(controller.focus(), Focus::Result(1));

    let propagation = modal_key(&mut controller, Key::Backspace);
    assert_eq!(propagation, Propagation::PreventDefault);
    assert_eq!(controller.focus(), Focus::Input);
    assert!(!controller.host().is_selected(1));
    // still open: going back to the input is not a close
    assert!(controller.is_open());
}

#[test]
fn arrow_down_past_the_end_stays_on_last() {
    let mut controller = three_results();
    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    for _ in 0..5 {
        let _ = modal_key(&mut controller, Key::ArrowDown);
    }
    assert_eq!(controller.focus(), Focus::Result(2));
    assert_eq!(controller.host().selected.len(), 1);
}

#[test]
fn arrow_down_with_no_results_does_nothing() {
    let mut controller = ready_controller(repeated_corpus("install", 3), SearchConfig::default());
    type_query(&mut controller, "zzz");
    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    assert_eq!(controller.focus(), Focus::Input);
}

#[test]
fn escape_from_a_result_closes_and_refocuses_input() {
    let mut controller = three_results();
    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    let before = controller.host().input_focus_count;

    let _ = modal_key(&mut controller, Key::Escape);
    assert!(!controller.is_open());
    assert_eq!(controller.focus(), Focus::Input);
    assert_eq!(controller.host().input_focus_count, before + 1);
}

#[test]
fn enter_on_result_without_url_stays() {
    let docs: Vec<Document> = vec![Document::new().with("title", "Install offline")];
    let mut controller = ready_controller(docs, SearchConfig::default());
    type_query(&mut controller, "install");
    assert!(controller.host().results_html.contains(r#"href="""#));

    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    let _ = modal_key(&mut controller, Key::Enter);
    assert_eq!(controller.host().navigated, None);
}

#[test]
fn aliased_url_is_navigated() {
    let config = SearchConfig {
        aliases: vec![litesearch::Alias::new("permalink", "url")],
        ..SearchConfig::default()
    };
    let docs = vec![make_doc("Install Guide", "How to install", "/old").with("permalink", "/new")];
    let mut controller = ready_controller(docs, config);
    type_query(&mut controller, "install");

    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    let _ = modal_key(&mut controller, Key::Enter);
    assert_eq!(controller.host().navigated.as_deref(), Some("/new"));
}

#[test]
fn query_string_urls_navigate_unescaped() {
    let docs = vec![make_doc("Install Guide", "How to install", "/docs?page=install&lang=en")];
    let mut controller = ready_controller(docs, SearchConfig::default());
    type_query(&mut controller, "install");
    assert!(controller
        .host()
        .results_html
        .contains(r#"href="/docs?page=install&amp;lang=en""#));

    let _ = controller.handle(WidgetEvent::InputKey(Key::ArrowDown));
    let _ = modal_key(&mut controller, Key::Enter);
    assert_eq!(
        controller.host().navigated.as_deref(),
        Some("/docs?page=install&lang=en")
    );
}
