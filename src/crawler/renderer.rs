//! Page rendering engine
//!
//! The crawler only needs two things from the engine that loads pages:
//! navigating to a URL within a timeout, and reading rendered text from the
//! quote blocks of the loaded page. [`PageRenderer`] and [`QuoteElement`]
//! are that seam. [`HttpRenderer`] is the production engine: it fetches the
//! page over HTTP and renders it with the HTML parser.

use crate::config::UserAgentConfig;
use crate::crawler::parser::parse_listing_page;
use crate::NavigationError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Optional regions of a quote block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The `tags: ...` annotation
    Tags,
    /// The `N likes` annotation
    Likes,
}

/// A quote block on a rendered page
#[async_trait]
pub trait QuoteElement: Send + Sync {
    /// Rendered text of the quote body and attribution line
    async fn quote_text(&self) -> String;

    /// Rendered text of an optional region
    ///
    /// Returns `None` when the region is not present in the page at all.
    async fn region_text(&self, region: Region) -> Option<String>;
}

/// A successfully loaded listing page
pub struct RenderedPage {
    /// Final URL after redirects
    pub url: Url,

    /// The page title, if any
    pub title: Option<String>,

    /// Quote blocks in the order they are rendered
    pub blocks: Vec<Box<dyn QuoteElement>>,
}

/// Navigates to pages and hands back their rendered content
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Loads `url`, failing if the page is not ready within `timeout`
    async fn navigate(&self, url: &Url, timeout: Duration) -> Result<RenderedPage, NavigationError>;
}

/// A quote block whose text was fully rendered up front
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBlock {
    pub text: String,
    pub tags_region: Option<String>,
    pub likes_region: Option<String>,
}

#[async_trait]
impl QuoteElement for QuoteBlock {
    async fn quote_text(&self) -> String {
        self.text.clone()
    }

    async fn region_text(&self, region: Region) -> Option<String> {
        match region {
            Region::Tags => self.tags_region.clone(),
            Region::Likes => self.likes_region.clone(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Timeouts are applied per navigation, so the client itself only bounds
/// connection setup.
///
/// # Example
///
/// ```no_run
/// use quote_harvest::config::UserAgentConfig;
/// use quote_harvest::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "QuoteHarvest".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renders pages by fetching them over HTTP and parsing the markup
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a renderer whose requests identify as the configured crawler
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn navigate(&self, url: &Url, timeout: Duration) -> Result<RenderedPage, NavigationError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavigationError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(parse_listing_page(&body, final_url))
    }
}

/// Maps a client error onto a navigation failure
fn classify_error(url: &Url, e: reqwest::Error) -> NavigationError {
    if e.is_timeout() {
        NavigationError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        NavigationError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        NavigationError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
