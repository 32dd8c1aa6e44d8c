//! PetRescue scraper entry point
//!
//! This is the command-line interface for the one-shot listing scraper.

use anyhow::Context;
use clap::Parser;
use petrescue_scraper::config::{load_config_with_hash, Config};
use petrescue_scraper::crawler::{run_scrape, ErrorPolicy, RunSummary};
use petrescue_scraper::storage::RefreshMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// PetRescue scraper: crawl dog listings into SQLite
///
/// Walks every page of the PetRescue search results, visits each listing to
/// read its breed, and stores the records in a local SQLite table.
#[derive(Parser, Debug)]
#[command(name = "petrescue-scraper")]
#[command(version)]
#[command(about = "Crawl PetRescue dog listings into SQLite", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the SQLite database path
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Override the target table name
    #[arg(long, value_name = "NAME")]
    table: Option<String>,

    /// Clear rows left by previous runs before inserting
    #[arg(long)]
    fresh: bool,

    /// Drop listings whose detail page fails instead of aborting
    #[arg(long)]
    skip_failed_details: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(summary) => {
            println!("Scraped {} records", summary.records);
            if summary.skipped > 0 {
                println!("Skipped {} records", summary.skipped);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Scrape failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("petrescue_scraper=info,warn"),
            1 => EnvFilter::new("petrescue_scraper=debug,info"),
            2 => EnvFilter::new("petrescue_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, applies command-line overrides and runs the scrape
async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    petrescue_scraper::config::validate(&config).context("invalid settings")?;

    tracing::info!(
        "Output: {} (table '{}', refresh {})",
        config.output.database_path,
        config.output.table_name,
        config.output.refresh.as_str()
    );

    let summary = run_scrape(&config).await.context("scrape aborted")?;
    Ok(summary)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(database) = &cli.database {
        config.output.database_path = database.clone();
    }
    if let Some(table) = &cli.table {
        config.output.table_name = table.clone();
    }
    if cli.fresh {
        config.output.refresh = RefreshMode::Replace;
    }
    if cli.skip_failed_details {
        config.enrichment.on_error = ErrorPolicy::Skip;
    }
}
