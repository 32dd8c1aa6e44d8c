//! Detail pages and the enrichment stage

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::extract_breed;
use crate::crawler::site::Scraper;
use crate::model::Animal;
use crate::ScrapeError;
use serde::Deserialize;

/// How the enrichment stage reacts to a failed detail page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole run on the first error
    #[default]
    Abort,

    /// Log the error, drop that record and carry on
    Skip,
}

/// Records after the enrichment stage
#[derive(Debug, Clone, Default)]
pub struct Enriched {
    /// Enriched records, in input order
    pub animals: Vec<Animal>,

    /// Records dropped under [`ErrorPolicy::Skip`]
    pub skipped: usize,
}

impl Scraper {
    /// Fetches a detail page and returns its breed, if the page shows one
    pub async fn fetch_breed(&self, address: &str) -> Result<Option<String>, ScrapeError> {
        let body = fetch_page(&self.client, address).await?;
        extract_breed(&body)
    }

    /// Fills in the breed of one record from its detail page
    ///
    /// A page without a breed heading leaves `breed` empty.
    pub async fn enrich_animal(&self, animal: &mut Animal) -> Result<(), ScrapeError> {
        if animal.address.is_empty() {
            return Err(ScrapeError::MissingDetailLink {
                name: animal.name.clone(),
            });
        }

        animal.breed = self.fetch_breed(&animal.address).await?.unwrap_or_default();
        tracing::debug!("{} -> breed '{}'", animal.address, animal.breed);
        Ok(())
    }

    /// Enriches every record in order, one request at a time
    pub async fn enrich(
        &self,
        animals: Vec<Animal>,
        policy: ErrorPolicy,
    ) -> Result<Enriched, ScrapeError> {
        let total = animals.len();
        let mut result = Enriched {
            animals: Vec::with_capacity(total),
            skipped: 0,
        };

        for (i, mut animal) in animals.into_iter().enumerate() {
            match self.enrich_animal(&mut animal).await {
                Ok(()) => result.animals.push(animal),
                Err(e) if policy == ErrorPolicy::Skip => {
                    tracing::warn!("Skipping '{}': {}", animal.name, e);
                    result.skipped += 1;
                }
                Err(e) => return Err(e),
            }

            if (i + 1) % 25 == 0 {
                tracing::info!("Enriched {}/{} listings", i + 1, total);
            }
        }

        tracing::info!(
            "Enrichment complete: {} records, {} skipped",
            result.animals.len(),
            result.skipped
        );

        Ok(result)
    }
}
