// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Matching: which documents does a query hit, and how well?
//!
//! The widget only needs `search(query) -> ranked matches`, so that is the
//! whole [`MatchEngine`] trait. [`WeightedEngine`] is the bundled
//! implementation: each configured key is matched independently and the
//! per-key scores are folded into one document score, weighted by key.
//!
//! # Scoring
//!
//! A field score is `errors / query_len`, so 0.0 is a perfect hit. Where the
//! hit sits in the field and how long the field is do not matter. The
//! document score is the weighted geometric product
//!
//! ```text
//! score = Π max(field_score, ε) ^ (weight / Σ weights)
//! ```
//!
//! over the keys that matched. Lower is better; hitting more keys lowers
//! the product further.

mod approx;

pub use approx::{best_occurrence, literal_occurrences, Occurrence};

use crate::config::{EngineTuning, SearchConfig};
use crate::types::{Document, FieldMatch, Match};
use crate::utils::{fold, fold_case};

/// Anything that can rank documents for a query.
pub trait MatchEngine {
    /// Matches ordered by descending relevance.
    fn search(&self, query: &str) -> Vec<Match>;
}

struct PreparedField {
    key: usize,
    value: String,
    folded: Vec<char>,
}

struct PreparedDoc {
    fields: Vec<PreparedField>,
}

/// Key-weighted fuzzy/exact engine over an in-memory document list.
pub struct WeightedEngine {
    keys: Vec<(String, f64)>,
    docs: Vec<PreparedDoc>,
    tuning: EngineTuning,
    fold_text: fn(&str) -> Vec<char>,
    include_matches: bool,
}

impl WeightedEngine {
    pub fn new(documents: &[Document], config: &SearchConfig) -> Self {
        let tuning = config.tuning();
        // exact matching is case-insensitive only; diacritics must match
        let fold_text: fn(&str) -> Vec<char> = if tuning.literal { fold_case } else { fold };
        let total: f64 = config.keys.iter().map(|key| key.weight).sum();
        let keys: Vec<(String, f64)> = config
            .keys
            .iter()
            .map(|key| (key.name.clone(), key.weight / total))
            .collect();

        let docs = documents
            .iter()
            .map(|doc| PreparedDoc {
                fields: keys
                    .iter()
                    .enumerate()
                    .filter_map(|(key, (name, _))| {
                        doc.get(name).map(|value| PreparedField {
                            key,
                            value: value.to_string(),
                            folded: fold_text(value),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            keys,
            docs,
            fold_text,
            tuning,
            include_matches: config.include_matches,
        }
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Score one field; `None` when the query does not hit it.
    fn match_field(&self, pattern: &[char], field: &PreparedField) -> Option<(f64, FieldMatch)> {
        let (score, spans) = if self.tuning.literal {
            let spans = literal_occurrences(pattern, &field.folded);
            if spans.is_empty() {
                return None;
            }
            let spans = if self.tuning.find_all_matches {
                spans
            } else {
                spans.into_iter().take(1).collect()
            };
            (0.0, spans)
        } else {
            let max_errors = (self.tuning.threshold * pattern.len() as f64).floor() as usize;
            let found = best_occurrence(pattern, &field.folded, max_errors)?;
            (found.errors as f64 / pattern.len() as f64, vec![found.span])
        };

        Some((
            score,
            FieldMatch {
                key: self.keys[field.key].0.clone(),
                value: field.value.clone(),
                spans,
            },
        ))
    }
}

impl MatchEngine for WeightedEngine {
    fn search(&self, query: &str) -> Vec<Match> {
        let pattern = (self.fold_text)(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Match> = self
            .docs
            .iter()
            .enumerate()
            .filter_map(|(doc, prepared)| {
                let mut score = 1.0;
                let mut fields = Vec::new();
                for field in &prepared.fields {
                    if let Some((field_score, hit)) = self.match_field(&pattern, field) {
                        let weight = self.keys[field.key].1;
                        score *= f64::max(field_score, f64::EPSILON).powf(weight);
                        fields.push(hit);
                    }
                }
                if fields.is_empty() {
                    return None;
                }
                if !self.include_matches {
                    fields.clear();
                }
                Some(Match { doc, score, fields })
            })
            .collect();

        // stable: equal scores keep index order
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches
    }
}
