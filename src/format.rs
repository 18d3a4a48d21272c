// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! From raw matches to render-ready view-models.
//!
//! [`SearchPipeline::run`] is the per-keystroke entry point: length gate,
//! engine call, truncation, then per match
//!
//! 1. resolve the display fields (aliases applied last, so they win)
//! 2. swap the description for a snippet around the first `content` hit
//!    when matches are included
//! 3. wrap every case-insensitive occurrence of the query in `<mark>`
//! 4. split `Section|Title` titles
//!
//! All document text is HTML-escaped here; the strings in a [`ResultView`]
//! are markup, safe to inject as-is.

use regex::{Regex, RegexBuilder};

use crate::config::{Alias, SearchConfig};
use crate::engine::{MatchEngine, WeightedEngine};
use crate::types::{Document, Match, Span};
use crate::utils::{char_slice, escape_html};

pub const MISSING_TITLE: &str = "Item missing title.";
pub const MISSING_DESCRIPTION: &str = "Item missing description.";
pub const ELLIPSIS: &str = "...";

/// Document field that snippets are cut from.
pub const CONTENT_KEY: &str = "content";

/// The display fields of a document after alias substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub id: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
}

impl ResolvedFields {
    pub fn resolve(doc: &Document, aliases: &[Alias]) -> Self {
        let mut fields = Self {
            title: non_empty(doc.get("title")),
            description: non_empty(doc.get("description")),
            id: non_empty(doc.get("id")),
            url: non_empty(doc.get("url")),
            image: non_empty(doc.get("image")),
        };
        fields.apply_aliases(doc, aliases);
        fields
    }

    /// Overwrite each aliased output with the document's input field.
    ///
    /// Reads only from `doc`, never from `self`, so applying the same map
    /// again changes nothing.
    pub fn apply_aliases(&mut self, doc: &Document, aliases: &[Alias]) {
        for alias in aliases {
            let value = non_empty(doc.get(&alias.input));
            match alias.output.as_str() {
                "title" => self.title = value,
                "description" => self.description = value,
                "id" => self.id = value,
                "url" => self.url = value,
                "image" => self.image = value,
                other => tracing::trace!(output = other, "alias output is not a display field"),
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Title markup, optionally split into its section prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleView {
    Plain(String),
    Sectioned { section: String, title: String },
}

impl TitleView {
    pub fn to_html(&self) -> String {
        match self {
            TitleView::Plain(title) => title.clone(),
            TitleView::Sectioned { section, title } => format!(
                r#"<span class="section">{}</span><span class="separator">|</span><span class="title">{}</span>"#,
                section, title
            ),
        }
    }
}

/// One render-ready result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Position in the ranked list; doubles as the tab order.
    pub rank: usize,
    pub title: TitleView,
    pub description: String,
    pub id: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
}

/// What the results list should show for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query is not longer than `minInputLength`.
    PromptForMoreInput,
    /// Nothing matched.
    NoResults,
    Results(Vec<ResultView>),
}

impl SearchOutcome {
    /// Informational text for the sentinel variants.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::PromptForMoreInput => Some("Type more to search."),
            SearchOutcome::NoResults => Some("No results found."),
            SearchOutcome::Results(_) => None,
        }
    }

    pub fn results(&self) -> &[ResultView] {
        match self {
            SearchOutcome::Results(views) => views,
            _ => &[],
        }
    }
}

/// Case-insensitive matcher for the literal query text.
///
/// Metacharacters are escaped, so `c++` or `(draft` highlight literally
/// instead of failing to compile.
pub fn build_highlighter(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%err, "query too large to highlight");
            None
        }
    }
}

/// Escape `text` and wrap every highlighter hit in `<mark>`.
pub fn highlight(text: &str, highlighter: Option<&Regex>) -> String {
    let Some(re) = highlighter else {
        return escape_html(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for hit in re.find_iter(text) {
        if hit.start() == hit.end() {
            continue;
        }
        out.push_str(&escape_html(&text[last..hit.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(hit.as_str()));
        out.push_str("</mark>");
        last = hit.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Cut a window of about `max_context_length` chars around `span`.
///
/// The window grows by half the spare length on each side and is clamped to
/// `[0, len - 1]`. Output is plain text wrapped in ellipses.
pub fn capture_context(value: &str, span: Span, max_context_length: usize) -> String {
    let len = value.chars().count() as isize;
    let (start, end) = (span.start as isize, span.end as isize);
    let half = (max_context_length as isize - (end - start)).div_euclid(2);

    let first = (start - half).max(0);
    let last = (end + half).min(len - 1);

    let window = if first < last {
        char_slice(value, first as usize, last as usize)
    } else {
        ""
    };
    format!("{ELLIPSIS}{window}{ELLIPSIS}")
}

/// Split on the first `|`; `None` when there is no separator.
pub fn split_section(title: &str) -> Option<(&str, &str)> {
    title.split_once('|')
}

/// Index + engine + config: everything one keystroke needs.
pub struct SearchPipeline {
    docs: Vec<Document>,
    engine: Box<dyn MatchEngine>,
    config: SearchConfig,
}

impl SearchPipeline {
    /// Pipeline backed by the bundled [`WeightedEngine`].
    pub fn new(docs: Vec<Document>, config: SearchConfig) -> Self {
        let engine = WeightedEngine::new(&docs, &config);
        Self::with_engine(docs, Box::new(engine), config)
    }

    pub fn with_engine(
        docs: Vec<Document>,
        engine: Box<dyn MatchEngine>,
        config: SearchConfig,
    ) -> Self {
        Self {
            docs,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn run(&self, query: &str) -> SearchOutcome {
        if query.chars().count() <= self.config.min_input_length {
            return SearchOutcome::PromptForMoreInput;
        }

        let matches = self.engine.search(query);
        if matches.is_empty() {
            return SearchOutcome::NoResults;
        }

        let highlighter = build_highlighter(query);
        let views = matches
            .iter()
            .take(self.config.max_results)
            .filter_map(|m| self.docs.get(m.doc).map(|doc| (doc, m)))
            .enumerate()
            .map(|(rank, (doc, m))| self.view(rank, doc, m, highlighter.as_ref()))
            .collect();

        SearchOutcome::Results(views)
    }

    fn view(&self, rank: usize, doc: &Document, m: &Match, highlighter: Option<&Regex>) -> ResultView {
        let mut fields = ResolvedFields::resolve(doc, &self.config.aliases);

        if self.config.include_matches {
            if let Some((content, span)) = m.first_span(CONTENT_KEY) {
                fields.description = Some(capture_context(
                    &content.value,
                    span,
                    self.config.max_context_length,
                ));
            }
        }

        let title = match fields.title.as_deref() {
            Some(raw) if self.config.show_section_on_title => match split_section(raw) {
                Some((section, title)) => TitleView::Sectioned {
                    section: highlight(section, highlighter),
                    title: highlight(title, highlighter),
                },
                None => TitleView::Plain(highlight(raw, highlighter)),
            },
            Some(raw) => TitleView::Plain(highlight(raw, highlighter)),
            None => TitleView::Plain(MISSING_TITLE.to_string()),
        };

        let description = match fields.description.as_deref() {
            Some(raw) => highlight(raw, highlighter),
            None => MISSING_DESCRIPTION.to_string(),
        };

        ResultView {
            rank,
            title,
            description,
            id: fields.id,
            url: fields.url,
            image: fields.image,
        }
    }
}
