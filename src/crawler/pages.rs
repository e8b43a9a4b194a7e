//! Sequential page crawler
//!
//! Walks the numbered listing pages one at a time. Each navigation goes
//! through the retry executor; once a page is loaded its quote blocks are
//! extracted concurrently and the records are appended in block order.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::extract_record;
use crate::crawler::renderer::{PageRenderer, QuoteElement, Region, RenderedPage};
use crate::crawler::retry::{execute_with_retry, DelayStrategy};
use crate::record::QuoteRecord;
use crate::HarvestError;
use futures::future::join_all;
use std::time::Duration;
use url::Url;

/// Generates the URLs of listing pages `1..=page_count`
///
/// # Example
///
/// ```
/// use quote_harvest::crawler::page_urls;
/// use url::Url;
///
/// let base = Url::parse("https://www.goodreads.com/quotes").unwrap();
/// let urls = page_urls(&base, 2);
/// assert_eq!(urls[1].as_str(), "https://www.goodreads.com/quotes?page=2");
/// ```
pub fn page_urls(base_listing_url: &Url, page_count: u32) -> Vec<Url> {
    (1..=page_count)
        .map(|page| {
            let mut url = base_listing_url.clone();
            url.query_pairs_mut().append_pair("page", &page.to_string());
            url
        })
        .collect()
}

/// Drives navigation and extraction across listing pages
pub struct PageCrawler<'a> {
    renderer: &'a dyn PageRenderer,
    delay: &'a dyn DelayStrategy,
    navigation_timeout: Duration,
    field_timeout: Duration,
    max_retries: u32,
}

impl<'a> PageCrawler<'a> {
    pub fn new(
        renderer: &'a dyn PageRenderer,
        delay: &'a dyn DelayStrategy,
        config: &CrawlerConfig,
    ) -> Self {
        Self {
            renderer,
            delay,
            navigation_timeout: config.navigation_timeout(),
            field_timeout: config.field_timeout(),
            max_retries: config.max_retries,
        }
    }

    /// Crawls `page_count` pages and appends their records to `records`
    ///
    /// Pages are visited strictly in order; page N+1 is not requested until
    /// every record of page N has been appended.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<QuoteRecord>)` - `records` extended with every page's records
    /// * `Err(HarvestError::Navigation)` - A page could not be loaded within
    ///   the retry budget; the crawl stops there
    pub async fn crawl_pages(
        &self,
        base_listing_url: &Url,
        page_count: u32,
        mut records: Vec<QuoteRecord>,
    ) -> Result<Vec<QuoteRecord>, HarvestError> {
        for url in page_urls(base_listing_url, page_count) {
            tracing::info!("Crawling {}", url);

            let page = self.navigate(&url).await?;
            if page.url != url {
                tracing::debug!("{} redirected to {}", url, page.url);
            }
            let page_records = extract_page(&page, self.field_timeout).await;

            tracing::debug!("Extracted {} quotes from {}", page_records.len(), url);
            records.extend(page_records);
        }

        tracing::info!("Found {} quotes", records.len());

        Ok(records)
    }

    /// Navigates to one page, retrying transient failures
    async fn navigate(&self, url: &Url) -> Result<RenderedPage, HarvestError> {
        let renderer = self.renderer;
        let timeout = self.navigation_timeout;

        execute_with_retry(
            move || renderer.navigate(url, timeout),
            self.max_retries,
            self.delay,
        )
        .await
        .map_err(|source| HarvestError::Navigation {
            url: url.to_string(),
            source,
        })
    }
}

/// Extracts every block of a loaded page
///
/// Blocks are processed concurrently; the result keeps rendering order.
pub async fn extract_page(page: &RenderedPage, field_timeout: Duration) -> Vec<QuoteRecord> {
    join_all(
        page.blocks
            .iter()
            .map(|block| extract_block(block.as_ref(), field_timeout)),
    )
    .await
}

/// Reads the regions of one block and builds its record
async fn extract_block(block: &dyn QuoteElement, field_timeout: Duration) -> QuoteRecord {
    let text = block.quote_text().await;
    let tags = read_optional(block, Region::Tags, field_timeout).await;
    let likes = read_optional(block, Region::Likes, field_timeout).await;

    extract_record(&text, tags.as_deref(), likes.as_deref())
}

/// Reads an optional region, treating a lookup that outlasts `timeout` as absent
async fn read_optional(
    block: &dyn QuoteElement,
    region: Region,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, block.region_text(region)).await {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!("No {:?} region within {:?}", region, timeout);
            None
        }
    }
}
