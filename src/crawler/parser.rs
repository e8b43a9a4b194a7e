//! HTML parser for listing pages
//!
//! This module turns a fetched listing page into its title and the ordered
//! list of quote blocks it contains. Text is computed the way a browser's
//! `innerText` reads it:
//! - whitespace runs collapse to a single space
//! - `<br>` and block-level elements start a new line
//! - each line is trimmed, and blank lines at either end are dropped

use crate::crawler::renderer::{QuoteBlock, QuoteElement, RenderedPage};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One quote on the page
pub const QUOTE_SELECTOR: &str = ".quote";

/// The quote body and attribution line
pub const QUOTE_TEXT_SELECTOR: &str = ".quoteText";

/// The tags region, `tags: a, b, c`
pub const TAGS_SELECTOR: &str = ".greyText.smallText.left";

/// The likes region, `1234 likes`
pub const LIKES_SELECTOR: &str = ".right .smallText";

/// Elements that start a new line in rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "tr", "ul",
];

/// Parses a listing page into its title and quote blocks
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `url` - The URL the content was served from
///
/// # Example
///
/// ```
/// use quote_harvest::crawler::parse_listing_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Popular Quotes</title></head><body>
///   <div class="quote"><div class="quoteText">&ldquo;Hi&rdquo;<br>&#8213; Someone</div></div>
/// </body></html>"#;
/// let page = parse_listing_page(html, Url::parse("https://example.com/quotes").unwrap());
/// assert_eq!(page.title.as_deref(), Some("Popular Quotes"));
/// assert_eq!(page.blocks.len(), 1);
/// ```
pub fn parse_listing_page(html: &str, url: Url) -> RenderedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let blocks = extract_blocks(&document)
        .into_iter()
        .map(|block| Box::new(block) as Box<dyn QuoteElement>)
        .collect();

    RenderedPage { url, title, blocks }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every quote block in document order
fn extract_blocks(document: &Html) -> Vec<QuoteBlock> {
    let Ok(quote_selector) = Selector::parse(QUOTE_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&quote_selector)
        .map(|quote| QuoteBlock {
            // A block without a text element reads as empty and fails the quote pattern
            text: first_inner_text(quote, QUOTE_TEXT_SELECTOR).unwrap_or_default(),
            tags_region: first_inner_text(quote, TAGS_SELECTOR),
            likes_region: first_inner_text(quote, LIKES_SELECTOR),
        })
        .collect()
}

/// Rendered text of the first descendant matching `css`, if any
fn first_inner_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next().map(inner_text)
}

/// Computes browser-style rendered text for an element
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_rendered(element, &mut raw);

    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| line.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        .collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Appends the raw rendered text of `element`'s children to `raw`
///
/// Block-level children are separated from their surroundings by a single
/// line break on both sides; `<br>` always adds one.
fn push_rendered(element: ElementRef<'_>, raw: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                for c in text.chars() {
                    raw.push(if c.is_ascii_whitespace() { ' ' } else { c });
                }
            }
            Node::Element(el) => match el.name() {
                "script" | "style" => {}
                "br" => raw.push('\n'),
                name => {
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let block = BLOCK_ELEMENTS.contains(&name);
                    if block {
                        break_line(raw);
                    }
                    push_rendered(child, raw);
                    if block {
                        break_line(raw);
                    }
                }
            },
            _ => {}
        }
    }
}

/// Ends the current line unless it is already ended
fn break_line(raw: &mut String) {
    let kept = raw.trim_end_matches(' ').len();
    raw.truncate(kept);
    if !raw.is_empty() && !raw.ends_with('\n') {
        raw.push('\n');
    }
}
