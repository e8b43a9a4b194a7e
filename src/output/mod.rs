//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing the record collection as pretty-printed JSON
//! - Reading a previously written collection back
//! - Computing and printing collection statistics

mod json;
pub mod stats;
mod traits;

pub use json::{format_records, load_records, JsonFileOutput};
pub use stats::{compute_statistics, print_statistics, CollectionStatistics};
pub use traits::{OutputError, OutputResult, OutputSink};
