//! Crawler module for listing pagination and quote extraction
//!
//! This module contains the core harvesting logic, including:
//! - Retrying navigations with jittered delays
//! - Rendering listing pages into quote blocks
//! - Extracting typed records from block text
//! - Sequential page crawling and overall run coordination

mod coordinator;
mod extractor;
mod pages;
mod parser;
mod renderer;
mod retry;

pub use coordinator::{run_harvest, Coordinator};
pub use extractor::extract_record;
pub use pages::{extract_page, page_urls, PageCrawler};
pub use parser::{inner_text, parse_listing_page};
pub use renderer::{
    build_http_client, HttpRenderer, PageRenderer, QuoteBlock, QuoteElement, Region, RenderedPage,
};
pub use retry::{execute_with_retry, DelayStrategy, JitteredDelay, NoDelay};
