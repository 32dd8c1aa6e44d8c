//! The scraper handle shared by the pagination and enrichment stages

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::ScrapeError;
use reqwest::Client;
use url::Url;

/// Search results address for the crawl
///
/// Dogs within 50km of postcode 2256 in NSW, including interstate listings,
/// 60 results per page.
pub const SEARCH_URL: &str = "https://www.petrescue.com.au/listings/search/dogs?interstate=true&page=1&per_page=60&postcode%5Bdistance%5D=50&postcode%5Bpostcode%5D=2256&state_id%5B%5D=1";

/// HTTP client paired with the search address it pages through
#[derive(Debug, Clone)]
pub struct Scraper {
    pub(crate) client: Client,
    pub(crate) search_url: Url,
}

impl Scraper {
    /// Creates a scraper for an arbitrary search address
    pub fn new(client: Client, search_url: Url) -> Self {
        Self { client, search_url }
    }

    /// Creates a scraper for the PetRescue search using the configured client settings
    pub fn for_site(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        let search_url = Url::parse(SEARCH_URL)?;
        Ok(Self::new(client, search_url))
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}
