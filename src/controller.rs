// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The widget's state machine.
//!
//! [`Controller`] owns everything that changes while the user types: modal
//! state, focus, the loaded index. It never touches the page directly; every
//! side effect goes through a [`WidgetHost`], which is `web-sys` in the
//! browser and a recording fake in tests.
//!
//! # States
//!
//! ```text
//!            input / click (non-empty input)
//!   Closed ─────────────────────────────────▶ Open
//!     ▲                                        │
//!     └────────────────────────────────────────┘
//!      Escape · outside click · shortcut · native clear
//! ```
//!
//! Modal-scoped listeners are a value held inside [`ModalState::Open`].
//! Leaving `Open` drops it, and dropping it detaches them, so there is no
//! path back to `Closed` that keeps handlers alive.

use crate::config::SearchConfig;
use crate::format::SearchPipeline;
use crate::loader::{IndexState, LoadError};
use crate::render::render_outcome;
use crate::types::Document;

/// Keys the widget reacts to, parsed from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    Backspace,
    Delete,
    Char(char),
    Other,
}

impl Key {
    pub fn parse(name: &str) -> Key {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// Where a document-level keydown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    SearchInput,
    /// Some other `<input>` on the page; the shortcut must not steal it.
    OtherInput,
    Elsewhere,
}

/// Everything the page can tell the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The input's value changed.
    Input,
    /// Native clear button of a `type="search"` input.
    SearchCleared,
    InputClick,
    InputKey(Key),
    /// Keydown inside the results list. `item` is the rank of the result
    /// the event came from, when the page could tell.
    ModalKey { key: Key, item: Option<usize> },
    DocumentClick { on_input: bool },
    GlobalKey { key: Key, target: KeyTarget },
}

/// Whether the browser's default action should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Propagation {
    Continue,
    PreventDefault,
}

/// Page operations the controller needs.
pub trait WidgetHost {
    /// Registration of the modal-scoped listeners (results keydown and
    /// document click). Dropping it must detach them.
    type Listeners;

    fn input_value(&self) -> String;
    fn clear_input(&mut self);
    fn focus_input(&mut self);

    /// Replace the results list markup.
    fn set_results(&mut self, html: &str);
    /// Show or hide the results panel and mirror it in `aria-expanded`.
    fn set_modal_visible(&mut self, visible: bool);
    fn lock_scroll(&mut self);
    fn restore_scroll(&mut self);

    /// Focus the anchor of result `index`; false when there is none.
    fn focus_result(&mut self, index: usize) -> bool;
    fn set_result_selected(&mut self, index: usize, selected: bool);
    fn result_url(&self, index: usize) -> Option<String>;
    fn navigate(&mut self, url: &str);

    fn attach_modal_listeners(&mut self) -> Self::Listeners;
}

pub enum ModalState<L> {
    Closed,
    Open { listeners: L },
}

impl<L> ModalState<L> {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Result(usize),
    Elsewhere,
}

pub struct Controller<H: WidgetHost> {
    host: H,
    config: SearchConfig,
    index: IndexState,
    modal: ModalState<H::Listeners>,
    scroll_locked: bool,
    focus: Focus,
    result_count: usize,
    shortcut: char,
}

impl<H: WidgetHost> Controller<H> {
    pub fn new(host: H, config: SearchConfig) -> Self {
        let shortcut = config.shortcut.chars().next().unwrap_or('/');
        Self {
            host,
            config,
            index: IndexState::Loading,
            modal: ModalState::Closed,
            scroll_locked: false,
            focus: Focus::Elsewhere,
            result_count: 0,
            shortcut,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn index(&self) -> &IndexState {
        &self.index
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    /// Finish the one-shot index load.
    pub fn index_loaded(&mut self, loaded: Result<Vec<Document>, LoadError>) {
        self.index = match loaded {
            Ok(docs) => {
                tracing::info!(docs = docs.len(), "search index ready");
                IndexState::Ready(SearchPipeline::new(docs, self.config.clone()))
            }
            Err(err) => {
                tracing::error!(%err, path = %self.config.data_path, "search index failed to load");
                IndexState::Failed(err.to_string())
            }
        };
    }

    /// Swap in an already-built pipeline (custom engines, tests).
    pub fn set_pipeline(&mut self, pipeline: SearchPipeline) {
        self.index = IndexState::Ready(pipeline);
    }

    pub fn handle(&mut self, event: WidgetEvent) -> Propagation {
        match event {
            WidgetEvent::Input => {
                self.search();
                Propagation::Continue
            }
            WidgetEvent::SearchCleared => {
                self.close("search-cleared");
                Propagation::Continue
            }
            WidgetEvent::InputClick => {
                self.open("input-click");
                Propagation::Continue
            }
            WidgetEvent::InputKey(key) => self.input_key(key),
            WidgetEvent::ModalKey { key, item } => self.modal_key(key, item),
            WidgetEvent::DocumentClick { on_input } => {
                if self.is_open() && !on_input {
                    self.close("document-click");
                }
                Propagation::Continue
            }
            WidgetEvent::GlobalKey { key, target } => {
                if key != Key::Char(self.shortcut) || target == KeyTarget::OtherInput {
                    return Propagation::Continue;
                }
                self.toggle("global-shortcut");
                Propagation::PreventDefault
            }
        }
    }

    /// Re-run the pipeline for the current input and re-render in place.
    fn search(&mut self) {
        let Some(pipeline) = self.index.pipeline() else {
            tracing::trace!(state = self.index.label(), "input ignored until the index is ready");
            return;
        };

        let query = self.host.input_value();
        let outcome = pipeline.run(&query);
        self.result_count = outcome.results().len();
        self.host.set_results(&render_outcome(&outcome));
        self.focus = Focus::Input;

        if !self.is_open() {
            self.open("input");
        }
    }

    /// Closed → Open. Needs a ready index and something typed.
    pub fn open(&mut self, trigger: &str) {
        if self.is_open() || !self.index.is_ready() || self.host.input_value().is_empty() {
            return;
        }

        self.host.set_modal_visible(true);
        let listeners = self.host.attach_modal_listeners();
        self.modal = ModalState::Open { listeners };
        if self.config.modal_fullscreen {
            self.host.lock_scroll();
            self.scroll_locked = true;
        }
        tracing::debug!(trigger, action = "show", "modal");
    }

    /// Open → Closed: hide, release listeners, clear input and results.
    pub fn close(&mut self, trigger: &str) {
        // dropping the old state detaches the modal listeners
        let was_open = std::mem::replace(&mut self.modal, ModalState::Closed).is_open();

        self.host.set_modal_visible(false);
        if self.scroll_locked {
            self.host.restore_scroll();
            self.scroll_locked = false;
        }
        self.host.set_results("");
        self.host.clear_input();
        self.result_count = 0;
        if let Focus::Result(_) = self.focus {
            self.focus = Focus::Elsewhere;
        }

        if was_open {
            tracing::debug!(trigger, action = "hide", "modal");
        }
    }

    pub fn toggle(&mut self, trigger: &str) {
        if self.is_open() {
            self.close(trigger);
        } else {
            self.host.focus_input();
            self.focus = Focus::Input;
            self.open(trigger);
        }
    }

    fn input_key(&mut self, key: Key) -> Propagation {
        match key {
            Key::Escape => {
                self.close("input-escape");
                self.host.focus_input();
                self.focus = Focus::Input;
                Propagation::PreventDefault
            }
            Key::ArrowDown | Key::Enter => {
                self.move_to_result(0);
                Propagation::PreventDefault
            }
            _ => Propagation::Continue,
        }
    }

    fn modal_key(&mut self, key: Key, item: Option<usize>) -> Propagation {
        if !self.is_open() {
            return Propagation::Continue;
        }
        let current = item.or(match self.focus {
            Focus::Result(index) => Some(index),
            _ => None,
        });

        match key {
            Key::Escape => {
                self.close("modal-escape");
                self.host.focus_input();
                self.focus = Focus::Input;
            }
            Key::Backspace | Key::Delete | Key::Char('a') => self.back_to_input(current),
            Key::ArrowUp | Key::Char('w') => match current {
                Some(index) if index > 0 => self.move_to_result(index - 1),
                _ => self.back_to_input(current),
            },
            Key::ArrowDown | Key::Char('s') => {
                let next = current.map_or(0, |index| index + 1);
                self.move_to_result(next);
            }
            Key::Enter | Key::Char('d') => {
                if let Some(url) = current.and_then(|index| self.host.result_url(index)) {
                    if !url.is_empty() {
                        self.host.navigate(&url);
                    }
                }
            }
            _ => return Propagation::Continue,
        }
        Propagation::PreventDefault
    }

    /// Focus result `target`; past the last result nothing moves.
    fn move_to_result(&mut self, target: usize) {
        if target >= self.result_count || !self.host.focus_result(target) {
            return;
        }
        if let Focus::Result(previous) = self.focus {
            if previous != target {
                self.host.set_result_selected(previous, false);
            }
        }
        self.host.set_result_selected(target, true);
        self.focus = Focus::Result(target);
    }

    fn back_to_input(&mut self, item: Option<usize>) {
        self.host.focus_input();
        if let Some(index) = item {
            self.host.set_result_selected(index, false);
        }
        self.focus = Focus::Input;
    }
}
