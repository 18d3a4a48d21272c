// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the litesearch command-line interface.
//!
//! Three subcommands over a JSON index file: `search` to see ranked results
//! in the terminal, `render` to print the exact markup the widget would
//! inject, and `inspect` to check field coverage before shipping an index.
//! All of them run the same pipeline the browser runs.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "litesearch",
    about = "Client-side search widget: query and inspect JSON search indexes",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search an index and display ranked results
    Search {
        /// Path to the JSON index (array of objects)
        file: PathBuf,

        /// Search query
        query: String,

        /// Widget options as JSON (same keys as the browser options object)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of results (overrides maxResults)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Literal substring matching instead of fuzzy matching
        #[arg(long)]
        exact: bool,

        /// Show snippets around content matches
        #[arg(long)]
        include_matches: bool,
    },

    /// Print the results markup the widget would inject for a query
    Render {
        /// Path to the JSON index
        file: PathBuf,

        /// Search query
        query: String,

        /// Widget options as JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show document count and field coverage of an index
    Inspect {
        /// Path to the JSON index
        file: PathBuf,
    },
}
