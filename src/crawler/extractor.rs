//! Field extraction for a single quote block
//!
//! The listing markup offers no structured fields, so everything is recovered
//! from rendered text:
//! - quote text, author and title from the block text
//! - tags from the annotation region (`tags: a, b, c`)
//! - like count from the secondary annotation region (`1234 likes`)
//!
//! Extraction never fails. A field that cannot be recovered is left absent.

use crate::record::QuoteRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Marker preceding the comma-separated tag list
const TAGS_MARKER: &str = "tags:";

/// Marker following the like count
const LIKES_MARKER: &str = "likes";

/// Builds a record from the rendered text of one quote block
///
/// # Arguments
///
/// * `block_text` - Text of the quote element, `“<text>”\n― <author>, <title>`
/// * `annotation_text` - Text of the tags region, if the block has one
/// * `secondary_annotation_text` - Text of the likes region, if the block has one
///
/// # Example
///
/// ```
/// use quote_harvest::crawler::extract_record;
///
/// let record = extract_record(
///     "“So many books, so little time.”\n― Frank Zappa",
///     Some("tags: books, humor"),
///     Some("150796 likes"),
/// );
/// assert_eq!(record.author.as_deref(), Some("Frank Zappa"));
/// assert_eq!(record.likes, Some(150796));
/// ```
pub fn extract_record(
    block_text: &str,
    annotation_text: Option<&str>,
    secondary_annotation_text: Option<&str>,
) -> QuoteRecord {
    let (text, author, title) = parse_attribution(block_text);

    QuoteRecord {
        author,
        likes: secondary_annotation_text.and_then(parse_likes),
        tags: annotation_text.and_then(parse_tags),
        text,
        title,
    }
}

/// Splits the block text into quote body, author and title
///
/// When the block does not match the quote pattern the body is empty and
/// both attribution fields are absent.
fn parse_attribution(block_text: &str) -> (String, Option<String>, Option<String>) {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        // Body is greedy and may span lines; the attribution runs to end of line
        Regex::new(r"“(?P<text>(?s:.)*)”\n― (?P<attribution>.*)").unwrap()
    });

    let Some(caps) = re.captures(block_text) else {
        return (String::new(), None, None);
    };

    let text = caps
        .name("text")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut pieces = caps
        .name("attribution")
        .map(|m| m.as_str())
        .unwrap_or_default()
        .split(',')
        .map(|piece| piece.trim().to_string());

    let author = pieces.next();
    let title = pieces.next();

    (text, author, title)
}

/// Extracts the tag list following the `tags:` marker
///
/// Pieces are trimmed but not filtered, so a trailing comma yields a
/// trailing empty tag.
fn parse_tags(annotation_text: &str) -> Option<Vec<String>> {
    let remainder = annotation_text.split(TAGS_MARKER).nth(1)?;

    Some(
        remainder
            .split(',')
            .map(|tag| tag.trim().to_string())
            .collect(),
    )
}

/// Parses the like count preceding the `likes` marker
fn parse_likes(secondary_annotation_text: &str) -> Option<u64> {
    let count = secondary_annotation_text
        .split(LIKES_MARKER)
        .next()
        .unwrap_or_default()
        .trim();

    parse_leading_integer(count)
}

/// Parses the run of ASCII digits at the start of `value`
///
/// Anything after the digits is ignored ("12.7" is 12, "1,024" is 1).
/// Returns `None` when there are no leading digits, when the value is
/// negative, or when it does not fit in a `u64`.
fn parse_leading_integer(value: &str) -> Option<u64> {
    let unsigned = value.trim_start().strip_prefix('+').unwrap_or(value.trim_start());
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if end == 0 {
        return None;
    }

    unsigned[..end].parse().ok()
}
