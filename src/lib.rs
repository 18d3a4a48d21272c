//! Client-side search widget: fuzzy matching over a static JSON index.
//!
//! A page ships one JSON array of documents. The widget fetches it once,
//! matches every keystroke against the configured fields, and renders the
//! best hits into a results panel next to the search input.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  loader.rs  │────▶│  engine/     │────▶│  format.rs  │
//! │ (index JSON,│     │ (weighted    │     │ (snippets,  │
//! │  IndexState)│     │  fuzzy match)│     │  highlight) │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   controller.rs                      │
//! │  (modal state machine, keyboard navigation,          │
//! │   WidgetHost seam)                                   │
//! └─────────────────────────────────────────────────────┘
//!        │                        │
//!        ▼                        ▼
//!   wasm.rs (web-sys)        testing.rs (recording fake)
//! ```
//!
//! Everything above `wasm.rs` is plain Rust and runs natively, which is how
//! the CLI (`litesearch search`, `litesearch render`) and the test suite
//! drive the exact code the browser runs.
//!
//! # Usage
//!
//! ```
//! use litesearch::{Document, SearchConfig, SearchOutcome, SearchPipeline};
//!
//! let docs = vec![Document::new()
//!     .with("title", "Install Guide")
//!     .with("description", "How to install")
//!     .with("url", "/install")];
//! let pipeline = SearchPipeline::new(docs, SearchConfig::default());
//!
//! match pipeline.run("install") {
//!     SearchOutcome::Results(views) => assert_eq!(views[0].url.as_deref(), Some("/install")),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod format;
pub mod loader;
pub mod render;
pub mod types;
pub mod utils;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{Alias, ConfigError, KeyWeight, MatchStrategy, SearchConfig};
pub use controller::{Controller, Focus, Key, KeyTarget, Propagation, WidgetEvent, WidgetHost};
pub use engine::{MatchEngine, WeightedEngine};
pub use format::{
    build_highlighter, capture_context, highlight, split_section, ResolvedFields, ResultView,
    SearchOutcome, SearchPipeline, TitleView,
};
pub use loader::{check_status, load_index_file, parse_index, IndexState, LoadError};
pub use render::{render_item, render_outcome};
pub use types::{Document, FieldMatch, Match, Span};

#[cfg(feature = "wasm")]
pub use wasm::SearchWidget;
