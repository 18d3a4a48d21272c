//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides a page stand-in that records what the controller did, plus a
//! few canonical fixtures.

#![doc(hidden)]

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::controller::WidgetHost;
use crate::types::Document;

/// Listeners one modal registration adds in the browser: results keydown
/// and document click.
pub const MODAL_LISTENERS: usize = 2;

/// In-memory [`WidgetHost`] that records every side effect.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub input: String,
    pub results_html: String,
    pub modal_visible: bool,
    pub scroll_locked: bool,
    pub input_focus_count: usize,
    pub focused_result: Option<usize>,
    pub selected: BTreeSet<usize>,
    pub navigated: Option<String>,
    pub registrations: usize,
    live_listeners: Rc<Cell<usize>>,
}

/// Registration handed out by [`RecordingHost`]; dropping it detaches.
#[derive(Debug)]
pub struct RecordedListeners {
    live: Rc<Cell<usize>>,
}

impl Drop for RecordedListeners {
    fn drop(&mut self) {
        self.live.set(self.live.get() - MODAL_LISTENERS);
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user typing into the input.
    pub fn type_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Listeners currently attached through modal registrations.
    pub fn attached_listeners(&self) -> usize {
        self.live_listeners.get()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// `href` values of the rendered items, in document order, decoded the
    /// way `getAttribute` would return them.
    pub fn hrefs(&self) -> Vec<String> {
        self.results_html
            .split(r#"href=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(unescape_attribute)
            .collect()
    }
}

impl WidgetHost for RecordingHost {
    type Listeners = RecordedListeners;

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn focus_input(&mut self) {
        self.input_focus_count += 1;
        self.focused_result = None;
    }

    fn set_results(&mut self, html: &str) {
        self.results_html = html.to_string();
        self.selected.clear();
        self.focused_result = None;
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.modal_visible = visible;
    }

    fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    fn restore_scroll(&mut self) {
        self.scroll_locked = false;
    }

    fn focus_result(&mut self, index: usize) -> bool {
        if index < self.hrefs().len() {
            self.focused_result = Some(index);
            true
        } else {
            false
        }
    }

    fn set_result_selected(&mut self, index: usize, selected: bool) {
        if selected {
            self.selected.insert(index);
        } else {
            self.selected.remove(&index);
        }
    }

    fn result_url(&self, index: usize) -> Option<String> {
        self.hrefs().into_iter().nth(index)
    }

    fn navigate(&mut self, url: &str) {
        self.navigated = Some(url.to_string());
    }

    fn attach_modal_listeners(&mut self) -> RecordedListeners {
        self.registrations += 1;
        self.live_listeners.set(self.live_listeners.get() + MODAL_LISTENERS);
        RecordedListeners {
            live: Rc::clone(&self.live_listeners),
        }
    }
}

fn unescape_attribute(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Create a document with a title, description and url.
///
/// This is the canonical fixture used across tests.
pub fn make_doc(title: &str, description: &str, url: &str) -> Document {
    Document::new()
        .with("title", title)
        .with("description", description)
        .with("url", url)
}

/// The single-entry index from the widget's end-to-end scenarios.
pub fn install_guide_index() -> Vec<Document> {
    vec![make_doc("Install Guide", "How to install", "/install")]
}
