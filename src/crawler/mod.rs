//! Crawler module for fetching and extracting listings
//!
//! This module contains the scraping pipeline, including:
//! - HTTP fetching
//! - HTML extraction of listing cards and detail-page breeds
//! - The pagination driver and enrichment stage
//! - Overall run coordination

mod coordinator;
mod enrich;
mod fetcher;
mod pagination;
mod parser;
mod site;

pub use coordinator::{run_scrape, run_scrape_with, RunSummary};
pub use enrich::{Enriched, ErrorPolicy};
pub use fetcher::{build_http_client, fetch_page, user_agent_string};
pub use pagination::{listing_url, IndexResult};
pub use parser::{extract_breed, extract_listings};
pub use site::{Scraper, SEARCH_URL};
