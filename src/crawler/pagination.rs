//! Listing pages and the pagination driver

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::extract_listings;
use crate::crawler::site::Scraper;
use crate::model::Animal;
use crate::ScrapeError;
use url::Url;

/// Result of walking every listing page
#[derive(Debug, Clone, Default)]
pub struct IndexResult {
    /// Partial records in page order, then in-page order
    pub animals: Vec<Animal>,

    /// Listing pages requested, including the final empty one
    pub pages_fetched: u32,
}

/// Builds the address of one results page
///
/// Replaces the `page` query parameter in place, or appends it when absent.
/// All other parameters are kept as they are.
pub fn listing_url(base: &Url, page: u32) -> Url {
    let page_value = page.to_string();
    let mut found = false;

    let pairs: Vec<(String, String)> = base
        .query_pairs()
        .map(|(key, value)| {
            if key == "page" {
                found = true;
                (key.into_owned(), page_value.clone())
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect();

    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        if !found {
            query.append_pair("page", &page_value);
        }
    }
    url
}

impl Scraper {
    /// Fetches one results page and extracts its listings
    ///
    /// A failed fetch or a non-success status is an error; there is no way to
    /// tell "past the last page" apart from an outage at this level.
    pub async fn listing_page(&self, page: u32) -> Result<Vec<Animal>, ScrapeError> {
        let url = listing_url(&self.search_url, page);
        let body = fetch_page(&self.client, url.as_str()).await?;
        extract_listings(&body)
    }

    /// Walks results pages from 1 until one comes back empty
    ///
    /// There is no upper bound: a site that never serves an empty page keeps
    /// this looping until a fetch fails.
    pub async fn index(&self) -> Result<IndexResult, ScrapeError> {
        let mut result = IndexResult::default();
        let mut page = 1;

        loop {
            let animals = self.listing_page(page).await?;
            result.pages_fetched += 1;

            if animals.is_empty() {
                tracing::info!("Page {} is empty, pagination complete", page);
                break;
            }

            tracing::info!("Page {}: {} listings", page, animals.len());
            result.animals.extend(animals);
            page += 1;
        }

        tracing::info!(
            "Collected {} listings from {} pages",
            result.animals.len(),
            result.pages_fetched
        );

        Ok(result)
    }
}
