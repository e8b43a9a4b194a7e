//! Statistics over a harvested collection
//!
//! Used to summarize a finished run and by the `--stats` mode, which reads
//! an existing output file.

use crate::record::QuoteRecord;
use std::collections::{HashMap, HashSet};

/// Number of tags listed by [`print_statistics`]
const TOP_TAG_COUNT: usize = 10;

/// Collection statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStatistics {
    /// Total number of records
    pub total_records: usize,

    /// Records whose block text matched the quote pattern
    pub with_text: usize,

    /// Records with an author
    pub with_author: usize,

    /// Records with a title
    pub with_title: usize,

    /// Records with a tag list
    pub with_tags: usize,

    /// Records with a like count
    pub with_likes: usize,

    /// Number of distinct non-empty authors
    pub distinct_authors: usize,

    /// Sum of all like counts
    pub total_likes: u64,

    /// Most frequent non-empty tags, most frequent first, ties by name
    pub top_tags: Vec<(String, usize)>,
}

/// Computes statistics over a collection of records
pub fn compute_statistics(records: &[QuoteRecord]) -> CollectionStatistics {
    let mut authors = HashSet::new();
    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    let mut stats = CollectionStatistics {
        total_records: records.len(),
        ..Default::default()
    };

    for record in records {
        if !record.text.is_empty() {
            stats.with_text += 1;
        }

        if let Some(author) = &record.author {
            stats.with_author += 1;
            if !author.is_empty() {
                authors.insert(author.as_str());
            }
        }

        if record.title.is_some() {
            stats.with_title += 1;
        }

        if let Some(tags) = &record.tags {
            stats.with_tags += 1;
            for tag in tags.iter().filter(|t| !t.is_empty()) {
                *tag_counts.entry(tag.as_str()).or_default() += 1;
            }
        }

        if let Some(likes) = record.likes {
            stats.with_likes += 1;
            stats.total_likes = stats.total_likes.saturating_add(likes);
        }
    }

    stats.distinct_authors = authors.len();

    let mut top_tags: Vec<(String, usize)> = tag_counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    top_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_tags.truncate(TOP_TAG_COUNT);
    stats.top_tags = top_tags;

    stats
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CollectionStatistics) {
    println!("=== Quote Statistics ===\n");

    println!("Overview:");
    println!("  Total quotes: {}", stats.total_records);
    println!("  Distinct authors: {}", stats.distinct_authors);
    println!("  Total likes: {}", stats.total_likes);
    println!();

    println!("Field Coverage:");
    for (name, count) in [
        ("text", stats.with_text),
        ("author", stats.with_author),
        ("title", stats.with_title),
        ("tags", stats.with_tags),
        ("likes", stats.with_likes),
    ] {
        let percentage = if stats.total_records > 0 {
            (count as f64 / stats.total_records as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", name, count, percentage);
    }
    println!();

    if !stats.top_tags.is_empty() {
        println!("Top Tags:");
        for (tag, count) in &stats.top_tags {
            println!("  - {} ({})", tag, count);
        }
    }
}
