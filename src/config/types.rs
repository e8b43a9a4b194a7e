use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::ConfigError;

/// Main configuration structure for Quote-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Returns the listing URL: the base origin joined with the listing path
    pub fn listing_url(&self) -> Result<Url, ConfigError> {
        let origin = Url::parse(&self.site.base_origin)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-origin: {}", e)))?;

        origin
            .join(&self.site.listing_path)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing-path: {}", e)))
    }
}

/// The site being harvested
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host of the listing site (e.g. "https://www.goodreads.com")
    #[serde(rename = "base-origin")]
    pub base_origin: String,

    /// Path of the listing relative to the origin
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Text the listing page title must contain before pagination starts
    #[serde(rename = "expected-title", default = "default_expected_title")]
    pub expected_title: String,
}

/// Crawl pacing and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of listing pages to walk, starting at page 1
    #[serde(rename = "page-count", default = "default_page_count")]
    pub page_count: u32,

    /// Timeout for a single navigation attempt (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// Bound on reading an optional region of a quote block (milliseconds)
    #[serde(rename = "field-timeout-ms", default = "default_field_timeout")]
    pub field_timeout_ms: u64,

    /// Additional navigation attempts after the first one fails
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Exclusive upper bound of the random delay between attempts (milliseconds)
    #[serde(rename = "max-retry-delay-ms", default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn field_timeout(&self) -> Duration {
        Duration::from_millis(self.field_timeout_ms)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_millis(self.max_retry_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_count: default_page_count(),
            navigation_timeout_ms: default_navigation_timeout(),
            field_timeout_ms: default_field_timeout(),
            max_retries: default_max_retries(),
            max_retry_delay_ms: default_max_retry_delay(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
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

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON file the collection is written to
    #[serde(rename = "output-path")]
    pub output_path: String,
}

fn default_listing_path() -> String {
    "/quotes".to_string()
}

fn default_expected_title() -> String {
    "Popular Quotes".to_string()
}

fn default_page_count() -> u32 {
    100
}

fn default_navigation_timeout() -> u64 {
    5_000
}

fn default_field_timeout() -> u64 {
    1_000
}

fn default_max_retries() -> u32 {
    5
}

fn default_max_retry_delay() -> u64 {
    10_000
}
