//! End-to-end crawl tests against a mock listing site

use petrescue_scraper::config::Config;
use petrescue_scraper::crawler::{build_http_client, run_scrape_with, ErrorPolicy, Scraper};
use petrescue_scraper::storage::RefreshMode;
use petrescue_scraper::ScrapeError;
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/listings/search/dogs";

/// Renders a results page with one card per (id, name)
fn results_page(base_url: &str, cards: &[(u32, &str)]) -> String {
    let cards: Vec<String> = cards
        .iter()
        .map(|(id, name)| {
            format!(
                r#"<article class="cards-listings-preview">
                    <header><h3>  {name}  </h3></header>
                    <a class="cards-listings-preview__content" href="{base_url}/listings/{id}">View</a>
                </article>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="search-results">{}</div></body></html>"#,
        cards.join("\n")
    )
}

fn detail_page(breed: Option<&str>) -> String {
    match breed {
        Some(breed) => format!(
            r#"<html><body><h3 class="pet-listing__content__breed"> {breed} </h3></body></html>"#
        ),
        None => "<html><body><p>No details</p></body></html>".to_string(),
    }
}

async fn mount_listing_page(server: &MockServer, page: u32, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_detail_page(server: &MockServer, id: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/listings/{}", id)))
        .respond_with(response)
        .mount(server)
        .await;
}

fn test_scraper(server: &MockServer) -> Scraper {
    let config = Config::default();
    let client = build_http_client(&config.user_agent, &config.http).unwrap();
    let search_url = Url::parse(&format!(
        "{}{}?interstate=true&page=1&per_page=60",
        server.uri(),
        SEARCH_PATH
    ))
    .unwrap();
    Scraper::new(client, search_url)
}

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.database_path = dir
        .path()
        .join("data.sqlite")
        .to_string_lossy()
        .into_owned();
    config
}

fn stored_rows(db_path: &str) -> Vec<(String, String, String)> {
    let conn = Connection::open(db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT URL, Name, Breed FROM data ORDER BY rowid")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    rows
}

/// Mounts a two-page site (three dogs) followed by an empty third page
async fn mount_small_site(server: &MockServer, expected_per_page: u64) {
    let base_url = server.uri();

    mount_listing_page(
        server,
        1,
        results_page(&base_url, &[(1, "Rex"), (2, "Bella")]),
        expected_per_page,
    )
    .await;
    mount_listing_page(
        server,
        2,
        results_page(&base_url, &[(3, "Max")]),
        expected_per_page,
    )
    .await;
    mount_listing_page(server, 3, results_page(&base_url, &[]), expected_per_page).await;

    mount_detail_page(
        server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page(Some("Kelpie"))),
    )
    .await;
    mount_detail_page(
        server,
        2,
        ResponseTemplate::new(200).set_body_string(detail_page(Some("Border Collie"))),
    )
    .await;
    mount_detail_page(
        server,
        3,
        ResponseTemplate::new(200).set_body_string(detail_page(None)),
    )
    .await;
}

#[tokio::test]
async fn test_pagination_stops_at_first_empty_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing_page(
        &server,
        1,
        results_page(&base_url, &[(1, "Rex"), (2, "Bella")]),
        1,
    )
    .await;
    mount_listing_page(&server, 2, results_page(&base_url, &[(3, "Max")]), 1).await;
    mount_listing_page(&server, 3, results_page(&base_url, &[]), 1).await;
    // Never requested: pagination must stop at page 3
    mount_listing_page(&server, 4, results_page(&base_url, &[(4, "Ghost")]), 0).await;

    let scraper = test_scraper(&server);
    let index = scraper.index().await.unwrap();

    assert_eq!(index.pages_fetched, 3);
    let names: Vec<&str> = index.animals.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Rex", "Bella", "Max"]);
    assert!(index.animals.iter().all(|a| a.breed.is_empty()));
    assert_eq!(index.animals[2].address, format!("{}/listings/3", base_url));
}

#[tokio::test]
async fn test_first_page_empty_yields_nothing() {
    let server = MockServer::start().await;
    mount_listing_page(&server, 1, results_page(&server.uri(), &[]), 1).await;

    let index = test_scraper(&server).index().await.unwrap();

    assert_eq!(index.pages_fetched, 1);
    assert!(index.animals.is_empty());
}

#[tokio::test]
async fn test_listing_page_error_is_fatal() {
    let server = MockServer::start().await;
    mount_listing_page(
        &server,
        1,
        results_page(&server.uri(), &[(1, "Rex")]),
        1,
    )
    .await;
    // Page 2 is not mounted, so the mock server answers 404

    let result = test_scraper(&server).index().await;
    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_enrichment_fills_breed_and_tolerates_missing() {
    let server = MockServer::start().await;
    mount_small_site(&server, 1).await;

    let scraper = test_scraper(&server);
    let index = scraper.index().await.unwrap();
    let enriched = scraper
        .enrich(index.animals, ErrorPolicy::Abort)
        .await
        .unwrap();

    let breeds: Vec<&str> = enriched.animals.iter().map(|a| a.breed.as_str()).collect();
    assert_eq!(breeds, vec!["Kelpie", "Border Collie", ""]);
    assert_eq!(enriched.skipped, 0);
}

#[tokio::test]
async fn test_full_run_persists_records() {
    let server = MockServer::start().await;
    mount_small_site(&server, 1).await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let summary = run_scrape_with(&test_scraper(&server), &config)
        .await
        .unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped, 0);

    let base_url = server.uri();
    assert_eq!(
        stored_rows(&config.output.database_path),
        vec![
            (
                format!("{}/listings/1", base_url),
                "Rex".to_string(),
                "Kelpie".to_string()
            ),
            (
                format!("{}/listings/2", base_url),
                "Bella".to_string(),
                "Border Collie".to_string()
            ),
            (
                format!("{}/listings/3", base_url),
                "Max".to_string(),
                String::new()
            ),
        ]
    );
}

#[tokio::test]
async fn test_detail_failure_aborts_before_storage() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing_page(
        &server,
        1,
        results_page(&base_url, &[(1, "Rex"), (2, "Bella")]),
        1,
    )
    .await;
    mount_listing_page(&server, 2, results_page(&base_url, &[]), 1).await;
    mount_detail_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page(Some("Kelpie"))),
    )
    .await;
    mount_detail_page(&server, 2, ResponseTemplate::new(500)).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let result = run_scrape_with(&test_scraper(&server), &config).await;

    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatus { status: 500, .. })
    ));
    assert!(!Path::new(&config.output.database_path).exists());
}

#[tokio::test]
async fn test_skip_policy_keeps_remaining_records() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_listing_page(
        &server,
        1,
        results_page(&base_url, &[(1, "Rex"), (2, "Bella"), (3, "Max")]),
        1,
    )
    .await;
    mount_listing_page(&server, 2, results_page(&base_url, &[]), 1).await;
    mount_detail_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page(Some("Kelpie"))),
    )
    .await;
    mount_detail_page(&server, 2, ResponseTemplate::new(503)).await;
    mount_detail_page(
        &server,
        3,
        ResponseTemplate::new(200).set_body_string(detail_page(Some("Beagle"))),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.enrichment.on_error = ErrorPolicy::Skip;

    let summary = run_scrape_with(&test_scraper(&server), &config)
        .await
        .unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 1);

    let names: Vec<String> = stored_rows(&config.output.database_path)
        .into_iter()
        .map(|(_, name, _)| name)
        .collect();
    assert_eq!(names, vec!["Rex", "Max"]);
}

#[tokio::test]
async fn test_rerun_appends_by_default() {
    let server = MockServer::start().await;
    mount_small_site(&server, 2).await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let scraper = test_scraper(&server);

    run_scrape_with(&scraper, &config).await.unwrap();
    run_scrape_with(&scraper, &config).await.unwrap();

    assert_eq!(stored_rows(&config.output.database_path).len(), 6);
}

#[tokio::test]
async fn test_rerun_with_replace_refreshes_table() {
    let server = MockServer::start().await;
    mount_small_site(&server, 2).await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.output.refresh = RefreshMode::Replace;
    let scraper = test_scraper(&server);

    run_scrape_with(&scraper, &config).await.unwrap();
    run_scrape_with(&scraper, &config).await.unwrap();

    assert_eq!(stored_rows(&config.output.database_path).len(), 3);
}
