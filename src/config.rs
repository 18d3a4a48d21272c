// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Widget configuration.
//!
//! Callers pass a partial options object; anything they leave out falls back
//! to the defaults below. The merged value is validated once and never
//! mutated afterwards, so every component can hold a shared reference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fuzzy threshold used when the caller does not override it.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.3;

/// Key the global shortcut listens for when none is configured.
pub const DEFAULT_SHORTCUT: &str = "/";

/// A searchable document field and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl KeyWeight {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

/// Read the view-model field `output` from the document field `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub input: String,
    pub output: String,
}

impl Alias {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
        }
    }
}

/// How strictly the query has to match a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Typo-tolerant approximate substring matching.
    #[default]
    Fuzzy,
    /// Whole-query literal containment, every occurrence located.
    Exact,
}

/// Engine knobs derived from the strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTuning {
    pub threshold: f64,
    pub find_all_matches: bool,
    pub literal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchConfig {
    pub keys: Vec<KeyWeight>,
    pub aliases: Vec<Alias>,
    pub data_path: String,
    pub form_selector: String,
    pub modal_selector: String,
    pub min_input_length: usize,
    pub match_strategy: MatchStrategy,
    pub max_results: usize,
    pub max_context_length: usize,
    pub include_matches: bool,
    pub show_section_on_title: bool,
    pub modal_fullscreen: bool,
    pub debug: bool,
    pub shortcut: String,
    /// Overrides [`DEFAULT_FUZZY_THRESHOLD`]; ignored by the exact strategy.
    pub threshold: Option<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keys: vec![KeyWeight::new("title", 3.0), KeyWeight::new("description", 2.0)],
            aliases: Vec::new(),
            data_path: "/index.json".to_string(),
            form_selector: "#search".to_string(),
            modal_selector: "#search > ul".to_string(),
            min_input_length: 0,
            match_strategy: MatchStrategy::Fuzzy,
            max_results: 10,
            max_context_length: 250,
            include_matches: false,
            show_section_on_title: true,
            modal_fullscreen: false,
            debug: false,
            shortcut: DEFAULT_SHORTCUT.to_string(),
            threshold: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("at least one search key is required")]
    NoKeys,

    #[error("key '{name}' has invalid weight {weight}")]
    InvalidWeight { name: String, weight: f64 },

    #[error("maxResults must be greater than zero")]
    ZeroMaxResults,

    #[error("threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("alias entries need both an input and an output field name")]
    EmptyAlias,

    #[error("shortcut must be a single key, got '{0}'")]
    InvalidShortcut(String),
}

impl SearchConfig {
    /// Merge JSON overrides onto the defaults and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::NoKeys);
        }
        for key in &self.keys {
            if !key.weight.is_finite() || key.weight <= 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: key.name.clone(),
                    weight: key.weight,
                });
            }
        }
        if self.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::InvalidThreshold(threshold));
            }
        }
        if self
            .aliases
            .iter()
            .any(|alias| alias.input.is_empty() || alias.output.is_empty())
        {
            return Err(ConfigError::EmptyAlias);
        }
        if self.shortcut.chars().count() != 1 {
            return Err(ConfigError::InvalidShortcut(self.shortcut.clone()));
        }
        Ok(())
    }

    pub fn tuning(&self) -> EngineTuning {
        match self.match_strategy {
            MatchStrategy::Fuzzy => EngineTuning {
                threshold: self.threshold.unwrap_or(DEFAULT_FUZZY_THRESHOLD),
                find_all_matches: false,
                literal: false,
            },
            MatchStrategy::Exact => EngineTuning {
                threshold: 0.0,
                find_all_matches: true,
                literal: true,
            },
        }
    }
}
