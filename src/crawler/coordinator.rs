//! Scrape coordinator - the end-to-end run
//!
//! Stages run strictly in sequence:
//! 1. Pagination over the search results
//! 2. Detail-page enrichment of every listing
//! 3. Persistence into the SQLite table
//!
//! The database is only opened once enrichment has succeeded, so a failed
//! fetch never leaves a partial batch in storage.

use crate::config::Config;
use crate::crawler::site::Scraper;
use crate::storage::{open_storage, save_records};
use crate::ScrapeError;
use std::path::Path;

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Listing pages requested
    pub pages: u32,

    /// Records written to storage
    pub records: usize,

    /// Records dropped because their detail page failed
    pub skipped: usize,
}

/// Runs a complete scrape against the PetRescue site
pub async fn run_scrape(config: &Config) -> Result<RunSummary, ScrapeError> {
    let scraper = Scraper::for_site(config)?;
    run_scrape_with(&scraper, config).await
}

/// Runs a complete scrape with the given scraper
pub async fn run_scrape_with(
    scraper: &Scraper,
    config: &Config,
) -> Result<RunSummary, ScrapeError> {
    tracing::info!("Starting scrape of {}", scraper.search_url());
    let start_time = std::time::Instant::now();

    let index = scraper.index().await?;
    let enriched = scraper
        .enrich(index.animals, config.enrichment.on_error)
        .await?;

    let mut summary = RunSummary {
        pages: index.pages_fetched,
        records: 0,
        skipped: enriched.skipped,
    };

    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    summary.records = save_records(
        &mut storage,
        &enriched.animals,
        &config.output.table_name,
        config.output.refresh,
    )?;

    tracing::info!(
        "Scrape completed: {} records from {} pages in {:?}",
        summary.records,
        summary.pages,
        start_time.elapsed()
    );

    Ok(summary)
}
