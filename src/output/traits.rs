//! Output sink trait and errors
//!
//! The harvested collection is handed to an [`OutputSink`] exactly once, at
//! the end of a successful run.

use crate::record::QuoteRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Durable destination for the final record collection
pub trait OutputSink: Send + Sync {
    /// Writes the complete collection, replacing any previous content
    fn write_records(&self, records: &[QuoteRecord]) -> OutputResult<()>;
}
