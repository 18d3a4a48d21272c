// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading the JSON document index.
//!
//! The index is fetched once per widget. Parsing is shared between the
//! browser fetch (see `wasm.rs`) and native file loading so both report the
//! same errors for the same bytes.

use std::path::Path;

use thiserror::Error;

use crate::format::SearchPipeline;
use crate::types::Document;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP error {status} fetching {url}")]
    Fetch { url: String, status: u16 },

    #[error("index is not a JSON array of objects: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read index '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Browser-side failure before a response arrived (network, CORS, bad URL).
    #[error("request for {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Parse the index body.
pub fn parse_index(bytes: &[u8]) -> Result<Vec<Document>, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and parse an index file from disk.
pub fn load_index_file(path: impl AsRef<Path>) -> Result<Vec<Document>, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_index(&bytes)
}

/// Map an HTTP status to the fetch contract: anything outside 2xx fails.
pub fn check_status(url: &str, status: u16) -> Result<(), LoadError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(LoadError::Fetch {
            url: url.to_string(),
            status,
        })
    }
}

/// Where the one-shot index load stands.
pub enum IndexState {
    Loading,
    Ready(SearchPipeline),
    /// Load failed; the widget stays inert until the page reloads.
    Failed(String),
}

impl IndexState {
    pub fn pipeline(&self) -> Option<&SearchPipeline> {
        match self {
            IndexState::Ready(pipeline) => Some(pipeline),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, IndexState::Ready(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndexState::Loading => "loading",
            IndexState::Ready(_) => "ready",
            IndexState::Failed(_) => "failed",
        }
    }
}
