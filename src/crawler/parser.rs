//! HTML extraction for listing and detail pages
//!
//! Selectors are site-specific. When the markup changes they simply stop
//! matching: fields come back empty rather than raising errors.

use crate::model::Animal;
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// One listing card in the search results
pub const CARD_SELECTOR: &str = "div.search-results article.cards-listings-preview";

/// Name heading inside a card
pub const NAME_SELECTOR: &str = "header h3";

/// Anchor inside a card pointing at the detail page
pub const LINK_SELECTOR: &str = "a.cards-listings-preview__content";

/// Breed heading on a detail page
pub const BREED_SELECTOR: &str = "h3.pet-listing__content__breed";

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Collects and trims all text beneath an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts partial records from a search results page
///
/// Each card yields one [`Animal`] with `address` and `name` filled in and an
/// empty `breed`. A card without a heading gets an empty name; a card without
/// the detail anchor gets an empty address.
pub fn extract_listings(html: &str) -> Result<Vec<Animal>, ScrapeError> {
    let card_selector = selector(CARD_SELECTOR)?;
    let name_selector = selector(NAME_SELECTOR)?;
    let link_selector = selector(LINK_SELECTOR)?;

    let document = Html::parse_document(html);

    let animals = document
        .select(&card_selector)
        .map(|card| {
            let name = card
                .select(&name_selector)
                .next()
                .map(element_text)
                .unwrap_or_default();

            let address = card
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"))
                .unwrap_or_default()
                .to_string();

            Animal::new(address, name)
        })
        .collect();

    Ok(animals)
}

/// Extracts the breed from a detail page
///
/// Returns the trimmed text of the first breed heading, or None when the page
/// has no such element.
pub fn extract_breed(html: &str) -> Result<Option<String>, ScrapeError> {
    let breed_selector = selector(BREED_SELECTOR)?;
    let document = Html::parse_document(html);

    Ok(document.select(&breed_selector).next().map(element_text))
}
