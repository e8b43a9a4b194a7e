//! Run coordinator - end-to-end harvest orchestration
//!
//! A run:
//! 1. Checks that the listing page loads and carries the expected title
//! 2. Crawls the configured number of listing pages
//! 3. Writes the complete collection to the output sink once
//!
//! A failure in steps 1 or 2 aborts the run before anything is written.

use crate::config::Config;
use crate::crawler::pages::PageCrawler;
use crate::crawler::renderer::{HttpRenderer, PageRenderer};
use crate::crawler::retry::{DelayStrategy, JitteredDelay};
use crate::output::{compute_statistics, CollectionStatistics, JsonFileOutput, OutputSink};
use crate::record::QuoteRecord;
use crate::HarvestError;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    renderer: Box<dyn PageRenderer>,
    delay: Box<dyn DelayStrategy>,
    sink: Box<dyn OutputSink>,
}

impl Coordinator {
    /// Creates a coordinator with the production engine, jittered retry
    /// delays, and a JSON file sink at the configured output path
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let renderer = HttpRenderer::from_config(&config.user_agent)?;
        let delay = JitteredDelay::new(config.crawler.max_retry_delay());
        let sink = JsonFileOutput::new(&config.output.output_path);

        Ok(Self::with_parts(
            config,
            Box::new(renderer),
            Box::new(delay),
            Box::new(sink),
        ))
    }

    /// Creates a coordinator from explicit collaborators
    pub fn with_parts(
        config: Config,
        renderer: Box<dyn PageRenderer>,
        delay: Box<dyn DelayStrategy>,
        sink: Box<dyn OutputSink>,
    ) -> Self {
        Self {
            config,
            renderer,
            delay,
            sink,
        }
    }

    /// Runs the harvest from listing check to output write
    ///
    /// # Returns
    ///
    /// * `Ok(CollectionStatistics)` - Statistics of the collection that was written
    /// * `Err(HarvestError)` - The run was aborted; no output was written
    pub async fn run(&self) -> Result<CollectionStatistics, HarvestError> {
        let listing_url = self.config.listing_url()?;
        let start_time = std::time::Instant::now();

        self.verify_listing(&listing_url).await?;

        let crawler = PageCrawler::new(
            self.renderer.as_ref(),
            self.delay.as_ref(),
            &self.config.crawler,
        );
        let records: Vec<QuoteRecord> = crawler
            .crawl_pages(&listing_url, self.config.crawler.page_count, Vec::new())
            .await?;

        self.sink.write_records(&records)?;

        let stats = compute_statistics(&records);
        tracing::info!(
            "Harvest completed: {} quotes from {} pages in {:?}",
            stats.total_records,
            self.config.crawler.page_count,
            start_time.elapsed()
        );

        Ok(stats)
    }

    /// Checks that the listing page is reachable and is the expected page
    ///
    /// This is attempted exactly once.
    async fn verify_listing(&self, listing_url: &url::Url) -> Result<(), HarvestError> {
        let expected = &self.config.site.expected_title;

        let page = self
            .renderer
            .navigate(listing_url, self.config.crawler.navigation_timeout())
            .await
            .map_err(|e| HarvestError::Precondition {
                url: listing_url.to_string(),
                message: e.to_string(),
            })?;

        match page.title.as_deref() {
            Some(title) if title.contains(expected.as_str()) => {
                tracing::debug!("Listing page title: {}", title);
                Ok(())
            }
            found => Err(HarvestError::Precondition {
                url: listing_url.to_string(),
                message: format!(
                    "expected title containing '{}', found {:?}",
                    expected, found
                ),
            }),
        }
    }
}

/// Runs a complete harvest with the production collaborators
pub async fn run_harvest(config: Config) -> Result<CollectionStatistics, HarvestError> {
    Coordinator::new(config)?.run().await
}
