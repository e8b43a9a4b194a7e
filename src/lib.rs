//! Quote-Harvest: a paginated quotation scraper
//!
//! This crate walks the numbered pages of a quotation listing, extracts a
//! structured record from every quote block it finds, and writes the whole
//! collection to a single JSON file at the end of the run.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Quote-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation to {url} failed after retries: {source}")]
    Navigation {
        url: String,
        #[source]
        source: NavigationError,
    },

    #[error("Listing page check failed for {url}: {message}")]
    Precondition { url: String, message: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A single failed navigation attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{execute_with_retry, extract_record, Coordinator, PageCrawler};
pub use record::QuoteRecord;
