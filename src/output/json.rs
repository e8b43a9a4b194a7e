//! JSON file output
//!
//! The collection is written as a 2-space indented JSON array. The file is
//! staged next to its destination and renamed into place, so readers see
//! either the previous file or the complete new one.

use crate::output::traits::{OutputResult, OutputSink};
use crate::record::QuoteRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes the collection to a JSON file, overwriting it
#[derive(Debug, Clone)]
pub struct JsonFileOutput {
    path: PathBuf,
}

impl JsonFileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for JsonFileOutput {
    fn write_records(&self, records: &[QuoteRecord]) -> OutputResult<()> {
        let json = format_records(records)?;

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut staged = NamedTempFile::new_in(&parent)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(std::io::Error::from)?;

        tracing::info!(
            "Wrote {} quotes to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// Serializes records as a pretty-printed JSON array
pub fn format_records(records: &[QuoteRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Reads a collection previously written by [`JsonFileOutput`]
pub fn load_records(path: &Path) -> OutputResult<Vec<QuoteRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
