//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the listing site and a temporary
//! SQLite file for storage.

mod crawl_tests;
