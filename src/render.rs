// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markup for the results container.

use crate::format::{ResultView, SearchOutcome};
use crate::utils::escape_html;

/// The `<li>` items injected into the results list for one outcome.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Results(views) => views.iter().map(render_item).collect(),
        sentinel => render_warning(sentinel.message().unwrap_or_default()),
    }
}

pub fn render_warning(message: &str) -> String {
    format!(r#"<li class="warning">{}</li>"#, escape_html(message))
}

/// One result: an anchor carrying the URL, optional id and image, and the
/// title/description blocks. Title and description are already markup.
pub fn render_item(view: &ResultView) -> String {
    let value = view
        .id
        .as_deref()
        .map(|id| format!(r#" value="{}""#, escape_html(id)))
        .unwrap_or_default();
    let href = escape_html(view.url.as_deref().unwrap_or_default());
    let image = view
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}">"#, escape_html(src)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<li role="option" aria-selected="false">"#,
            r#"<a{} href="{}" tabindex="{}">"#,
            "{}",
            r#"<div class="meta"><p>{}</p><p>{}</p></div>"#,
            "</a></li>",
        ),
        value,
        href,
        view.rank,
        image,
        view.title.to_html(),
        view.description,
    )
}
