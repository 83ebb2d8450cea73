mod config;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use logpane_store::{
    Destination, FilterView, LineParser, LogLevel, StoreEvent, WindowDestination,
};

use crate::config::Config;

/// Logpane - a live log-viewing sink fed from standard input
#[derive(Parser, Debug)]
#[command(name = "logpane")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of records to keep (oldest evicted first)
    #[arg(long)]
    capacity: Option<usize>,

    /// Minimum severity to display (trace, debug, info, warn, error, fatal, off)
    #[arg(long)]
    level: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the visible records to this file on exit
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args);

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let config = args
        .config
        .as_deref()
        .map(Config::load)
        .transpose()?
        .unwrap_or_default();

    // CLI flags win over the config file.
    let capacity = args.capacity.or(config.capacity).unwrap_or(10_000);
    let level_name = args
        .level
        .or(config.threshold)
        .unwrap_or_else(|| "info".to_string());
    let threshold = LogLevel::from_name(&level_name)
        .ok_or_else(|| anyhow!("unknown severity level '{}'", level_name))?;

    let destination = WindowDestination::new(capacity);
    let view = FilterView::new(destination.store().clone(), threshold);

    // Echo each committed record that passes the filter, the way a log
    // window would re-render on insert notifications.
    {
        let store = destination.store().clone();
        let view = view.clone();
        destination
            .store()
            .subscribe(Arc::new(move |event: StoreEvent| {
                if let StoreEvent::Inserted { index } = event {
                    let record = store.get(index)?;
                    if record.level >= view.threshold() {
                        println!("{}", record.formatted);
                    }
                }
                Ok(())
            }));
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        destination.write(LineParser::parse(&line));
    }

    let counts = destination.store().level_counts();
    eprintln!(
        "{} records kept ({} warn, {} error, {} fatal), {} visible at {}",
        counts.total(),
        counts.warn,
        counts.error,
        counts.fatal,
        view.visible_count(),
        view.threshold(),
    );

    if let Some(path) = &args.save {
        let text = view.visible_text();
        let mut file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(text.as_bytes())?;
        if !text.is_empty() {
            file.write_all(b"\n")?;
        }
    }

    Ok(())
}
