// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the litesearch CLI.
//!
//! Colors are the basic 16 ANSI ones, so the terminal's own theme decides
//! how they look on light and dark backgrounds. `NO_COLOR` and non-TTY
//! output disable styling entirely.
//!
//! The widget renders markup; [`terminal_markup`] turns the same strings into
//! styled terminal text so the CLI shows exactly what the page would.

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";

/// What a piece of output means; each tone maps to one ANSI style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Fair,
    Poor,
    Muted,
    Heading,
    Link,
    /// Highlighted query hit.
    Hit,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Good => "\x1b[32m",
            Tone::Fair => "\x1b[33m",
            Tone::Poor => "\x1b[31m",
            Tone::Muted => "\x1b[90m",
            Tone::Heading => "\x1b[1;36m",
            Tone::Link => "\x1b[2;34m",
            Tone::Hit => "\x1b[1;93m",
        }
    }
}

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Style `text` with `tone` when colors are on.
pub fn paint(tone: Tone, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", tone.code(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            in_escape = c != 'm';
        } else {
            len += 1;
        }
    }
    len
}

/// Cut a styled string to `width` visible chars, ending in `...` when cut.
///
/// Escape sequences are copied whole, so colors never break mid-code.
pub fn fit(s: &str, width: usize) -> String {
    if visible_len(s) <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    let mut visible = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
            out.push(c);
        } else if in_escape {
            in_escape = c != 'm';
            out.push(c);
        } else if visible < keep {
            visible += 1;
            out.push(c);
        }
    }
    if s.contains('\x1b') {
        out.push_str(RESET);
    }
    out.push_str("...");
    out
}

/// Pad a styled string with spaces up to `width` visible chars.
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(visible_len(s))))
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(visible_len(s))), s)
}

// ═══════════════════════════════════════════════════════════════════════════
// MARKUP → TERMINAL
// ═══════════════════════════════════════════════════════════════════════════

/// Render widget markup for the terminal.
///
/// `<mark>` becomes bold yellow, the section separator becomes a dim `›`,
/// every other tag is dropped and entities are decoded.
pub fn terminal_markup(html: &str, colors: bool) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find(&['<', '&'][..]) {
        out.push_str(&rest[..open]);
        rest = &rest[open..];

        if rest.starts_with('<') {
            let Some(close) = rest.find('>') else {
                out.push_str(rest);
                return out;
            };
            let tag = &rest[1..close];
            match tag {
                "mark" if colors => out.push_str(Tone::Hit.code()),
                "/mark" if colors => out.push_str(RESET),
                r#"span class="separator""# => {
                    // the separator span holds a literal `|`; skip it
                    let after = &rest[close + 1..];
                    let end = after.find("</span>").map_or(0, |i| i + "</span>".len());
                    rest = &after[end..];
                    if colors {
                        out.push_str(&format!(" {}›{} ", Tone::Muted.code(), RESET));
                    } else {
                        out.push_str(" › ");
                    }
                    continue;
                }
                _ => {}
            }
            rest = &rest[close + 1..];
        } else {
            let (decoded, len) = match rest {
                r if r.starts_with("&amp;") => ('&', 5),
                r if r.starts_with("&lt;") => ('<', 4),
                r if r.starts_with("&gt;") => ('>', 4),
                r if r.starts_with("&quot;") => ('"', 6),
                r if r.starts_with("&#39;") => ('\'', 5),
                _ => ('&', 1),
            };
            out.push(decoded);
            rest = &rest[len..];
        }
    }
    out.push_str(rest);
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    paint(Tone::Muted, text)
}

/// ┌─ LABEL ───┐ with the label as heading; `None` draws a plain rule.
fn rule(left: char, label: Option<&str>, right: char) {
    let label = label
        .map(|label| format!("─ {} ", paint(Tone::Heading, label)))
        .unwrap_or_default();
    let fill = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!(
        "{}{}{}",
        border(&left.to_string()),
        label,
        border(&format!("{}{}", fill, right))
    );
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let content = pad_right(&fit(content, BOX_WIDTH), BOX_WIDTH);
    println!("{}{}{}", border("│"), content, border("│"));
}

pub fn section_top(label: &str) {
    rule('┌', Some(label), '┐');
}

pub fn section_mid() {
    rule('├', None, '┤');
}

pub fn section_bot() {
    rule('└', None, '┘');
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded match score. Lower is better: 0 is an exact hit.
pub fn score_value(score: f64) -> String {
    let tone = if score < 0.05 {
        Tone::Good
    } else if score < 0.2 {
        Tone::Fair
    } else {
        Tone::Poor
    };
    paint(tone, &format!("{:>6.3}", score))
}

/// Share of documents carrying a field, as a percentage with color.
pub fn coverage(present: usize, total: usize) -> String {
    if total == 0 {
        return paint(Tone::Muted, "   N/A");
    }
    let pct = present as f64 / total as f64 * 100.0;
    let tone = if pct >= 99.5 {
        Tone::Good
    } else if pct >= 50.0 {
        Tone::Fair
    } else {
        Tone::Poor
    };
    paint(tone, &format!("{:>5.0}%", pct))
}

/// Dimmed label used for secondary fields (url, id).
pub fn label(text: &str) -> String {
    paint(Tone::Link, text)
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
