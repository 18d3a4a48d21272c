use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use litesearch::{
    load_index_file, render_outcome, Document, MatchEngine, MatchStrategy, SearchConfig,
    SearchOutcome, SearchPipeline, WeightedEngine,
};

mod cli;
use cli::display::{self, terminal_markup};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search {
            file,
            query,
            config,
            limit,
            exact,
            include_matches,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(limit) = limit {
                config.max_results = limit;
            }
            if exact {
                config.match_strategy = MatchStrategy::Exact;
            }
            if include_matches {
                config.include_matches = true;
            }
            config.validate().context("invalid search options")?;
            run_search(&file, &query, config)
        }
        Commands::Render {
            file,
            query,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let docs = load_index_file(&file)?;
            let pipeline = SearchPipeline::new(docs, config);
            println!("{}", render_outcome(&pipeline.run(&query)));
            Ok(())
        }
        Commands::Inspect { file } => {
            let docs = load_index_file(&file)?;
            inspect(&file, &docs);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "litesearch=warn",
        1 => "litesearch=debug",
        _ => "litesearch=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file '{}'", path.display()))?;
    SearchConfig::from_json(&json)
        .with_context(|| format!("invalid options in '{}'", path.display()))
}

fn run_search(file: &Path, query: &str, config: SearchConfig) -> Result<()> {
    let docs = load_index_file(file)?;
    let started = std::time::Instant::now();
    // a second engine only to report scores next to the rendered views
    let scores: Vec<f64> = WeightedEngine::new(&docs, &config)
        .search(query)
        .iter()
        .map(|m| m.score)
        .collect();
    let pipeline = SearchPipeline::new(docs, config);
    let outcome = pipeline.run(query);
    let elapsed = started.elapsed();
    let colors = display::use_colors();

    display::section_top(&format!("RESULTS \"{}\"", query));
    match &outcome {
        SearchOutcome::Results(views) => {
            for (view, score) in views.iter().zip(&scores) {
                let title = terminal_markup(&view.title.to_html(), colors);
                display::row(&format!(
                    " {} {} {}",
                    display::pad_left(&format!("{}.", view.rank + 1), 3),
                    display::score_value(*score),
                    title
                ));
                display::row(&format!(
                    "            {}",
                    terminal_markup(&view.description, colors)
                ));
                if let Some(url) = &view.url {
                    display::row(&format!("            {}", display::label(url)));
                }
            }
            display::section_mid();
            display::row(&format!(
                " {} of {} matches in {:.2?}",
                views.len(),
                scores.len(),
                elapsed
            ));
        }
        sentinel => {
            let message = sentinel.message().unwrap_or_default();
            display::row(&format!(" {}", display::paint(display::Tone::Muted, message)));
        }
    }
    display::section_bot();
    Ok(())
}

fn inspect(file: &Path, docs: &[Document]) {
    let mut coverage: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in docs {
        for name in doc.field_names() {
            *coverage.entry(name).or_default() += 1;
        }
    }

    display::section_top("INDEX");
    display::row(&format!(" {} {}", display::label("file     "), file.display()));
    display::row(&format!(" {} {}", display::label("documents"), docs.len()));
    display::section_mid();
    for (name, present) in &coverage {
        display::row(&format!(
            " {} {} {}",
            display::pad_right(name, 24),
            display::coverage(*present, docs.len()),
            display::pad_left(&format!("{}/{}", present, docs.len()), 12)
        ));
    }
    if coverage.is_empty() {
        display::row(" no fields");
    }
    display::section_bot();
}
