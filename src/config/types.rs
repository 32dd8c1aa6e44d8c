use crate::crawler::ErrorPolicy;
use crate::storage::RefreshMode;
use serde::Deserialize;

/// Main configuration structure for the scraper
///
/// Every section is optional; missing values fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub enrichment: EnrichmentConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "petrescue-scraper".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/auxesis/petrescue_scraper".to_string(),
            contact_email: "scraper@example.com".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Table the records are written to
    #[serde(rename = "table-name")]
    pub table_name: String,

    /// Handling of rows left by a previous run
    pub refresh: RefreshMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "data.sqlite".to_string(),
            table_name: "data".to_string(),
            refresh: RefreshMode::Append,
        }
    }
}

/// Detail-page enrichment configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// What to do when a detail page cannot be fetched
    #[serde(rename = "on-error")]
    pub on_error: ErrorPolicy,
}
