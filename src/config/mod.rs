//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. The target site itself is fixed and not configurable.
//!
//! # Example
//!
//! ```no_run
//! use petrescue_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Writing to table: {}", config.output.table_name);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EnrichmentConfig, HttpConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
