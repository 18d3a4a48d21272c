// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate substring search with an early-exit bound.
//!
//! Plain Levenshtein compares two whole strings. Here the pattern may start
//! anywhere in the text, so row 0 of the DP is zero for every column
//! (Sellers' semi-global variant). `|pattern| - max` is still a lower bound
//! on how much text an occurrence needs: anything shorter is rejected before
//! the DP allocates.

use crate::types::Span;

/// Best approximate occurrence of a pattern inside a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub errors: usize,
    pub span: Span,
}

/// Find the occurrence of `pattern` in `text` with the fewest edits, if it
/// needs at most `max` of them.
///
/// Ties go to the occurrence that ends first. Both inputs are already folded
/// (see [`crate::utils::fold`]), so offsets are character offsets.
pub fn best_occurrence(pattern: &[char], text: &[char], max: usize) -> Option<Occurrence> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }

    // Early-exit: the occurrence must cover at least m - max text chars
    if text.len() + max < m {
        return None;
    }

    // cost[i]: edits to align pattern[..i] ending at the current column
    // origin[i]: text offset where that alignment starts
    let mut cost: Vec<usize> = (0..=m).collect();
    let mut origin: Vec<usize> = vec![0; m + 1];
    let mut best: Option<Occurrence> = None;

    for (j, &tc) in text.iter().enumerate() {
        let mut diag_cost = cost[0];
        let mut diag_origin = origin[0];
        cost[0] = 0;
        origin[0] = j + 1;

        for i in 1..=m {
            let above_cost = cost[i];
            let above_origin = origin[i];

            let substitute = diag_cost + usize::from(pattern[i - 1] != tc);
            let skip_text = above_cost + 1;
            let skip_pattern = cost[i - 1] + 1;

            let (next_cost, next_origin) = if substitute <= skip_text && substitute <= skip_pattern {
                (substitute, diag_origin)
            } else if skip_text <= skip_pattern {
                (skip_text, above_origin)
            } else {
                (skip_pattern, origin[i - 1])
            };

            cost[i] = next_cost;
            origin[i] = next_origin;
            diag_cost = above_cost;
            diag_origin = above_origin;
        }

        if cost[m] <= max && best.map_or(true, |b| cost[m] < b.errors) {
            best = Some(Occurrence {
                errors: cost[m],
                span: Span::new(origin[m], j + 1),
            });
            if cost[m] == 0 {
                break;
            }
        }
    }

    best
}

/// Every non-overlapping literal occurrence of `pattern` in `text`.
pub fn literal_occurrences(pattern: &[char], text: &[char]) -> Vec<Span> {
    let m = pattern.len();
    let mut spans = Vec::new();
    if m == 0 || m > text.len() {
        return spans;
    }

    let mut start = 0;
    while start + m <= text.len() {
        if text[start..start + m] == *pattern {
            spans.push(Span::new(start, start + m));
            start += m;
        } else {
            start += 1;
        }
    }
    spans
}
