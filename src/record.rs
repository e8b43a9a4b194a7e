//! The quotation record produced for every quote block

use serde::{Deserialize, Serialize};

/// One extracted quotation
///
/// Fields serialize in a fixed order and absent values are omitted, so two
/// runs over the same pages produce byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Author, the first component of the attribution line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Like count, when the likes region held a leading integer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,

    /// Tags in the order they appear, empty pieces included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// The quotation body, possibly multi-line; empty when the block did
    /// not match the attribution pattern
    pub text: String,

    /// Source work, the second component of the attribution line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
