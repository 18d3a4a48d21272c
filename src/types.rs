// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types: index documents and the matches the engine reports.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One entry of the JSON index.
///
/// No schema: any field may be missing. String values are stored as-is,
/// numbers and booleans keep their JSON text, everything else is dropped
/// because it cannot be searched or rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and the CLI.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of document fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
                let mut fields = BTreeMap::new();
                while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        serde_json::Value::Bool(b) => b.to_string(),
                        _ => continue,
                    };
                    fields.insert(name, text);
                }
                Ok(Document { fields })
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Character offsets `[start, end)` of one occurrence inside a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where the query hit inside one field of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub key: String,
    pub value: String,
    pub spans: Vec<Span>,
}

/// A document the engine considers relevant.
///
/// `score` runs from 0.0 (perfect) to 1.0 (barely matched). `fields` is
/// only populated when the engine was asked to include matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub doc: usize,
    pub score: f64,
    pub fields: Vec<FieldMatch>,
}

impl Match {
    /// First reported occurrence in the field named `key`.
    pub fn first_span(&self, key: &str) -> Option<(&FieldMatch, Span)> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .and_then(|field| field.spans.first().map(|span| (field, *span)))
    }
}
