//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Fold one character for comparison: lowercase and, when available, strip
/// diacritics.
///
/// Always maps one character to exactly one character so that offsets into
/// the folded text are offsets into the original field as well:
/// - 'É' → 'e'
/// - 'ī' → 'i'
/// - 'ß' → 'ß' (multi-char lowercase forms keep their first char)
#[cfg(feature = "unicode-normalization")]
pub fn fold_char(c: char) -> char {
    let base = c.nfd().next().unwrap_or(c);
    base.to_lowercase().next().unwrap_or(base)
}

/// Lowercase only, for builds without unicode-normalization.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold_char(c: char) -> char {
    lowercase_char(c)
}

/// Lowercase one character, keeping diacritics.
pub fn lowercase_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold a whole string into comparable characters, one per source char.
pub fn fold(value: &str) -> Vec<char> {
    value.chars().map(fold_char).collect()
}

/// Lowercase a whole string, one char per source char. Literal matching
/// compares on this so that every hit is also a case-insensitive substring.
pub fn fold_case(value: &str) -> Vec<char> {
    value.chars().map(lowercase_char).collect()
}

/// Slice `value` by character offsets, clamping out-of-range bounds.
pub fn char_slice(value: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut indices = value.char_indices().map(|(i, _)| i).chain(Some(value.len()));
    let from = indices.nth(start).unwrap_or(value.len());
    let to = indices.nth(end - start - 1).unwrap_or(value.len());
    &value[from..to]
}

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
