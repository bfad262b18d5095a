//! HTML parsing for link and text extraction
//!
//! This module turns fetched HTML into:
//! - Links to follow (from `<a>` tags and canonical links)
//! - Visible plain text (everything except script, style and similar bodies)

use crate::url::normalize_parsed;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Phrasing elements that continue the surrounding word
///
/// Every other element (blocks, `br`, table cells, list items) is a word
/// boundary.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup",
    "time", "u", "var",
];

/// Extracts the visible text of an HTML document
///
/// Markup is stripped, entities are decoded and the bodies of `script`,
/// `style`, `noscript` and `template` elements are dropped. Inline markup
/// does not split words, so `Ad<b>min</b>` yields `Admin`, while block
/// elements and `<br>` do, so `<li>one</li><li>two</li>` yields two tokens.
/// Runs of whitespace collapse to one space. Malformed markup is parsed
/// best-effort; input that contains no text at all yields an empty string.
///
/// # Example
///
/// ```
/// use wordsmith::crawler::extract_text;
///
/// let html = "<p>Hello &amp; <b>wel</b>come</p><script>var x = 1;</script>";
/// assert_eq!(extract_text(html), "Hello & welcome");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, text: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            text.push_str(fragment);
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }

        let boundary = !INLINE_ELEMENTS.contains(&name);
        if boundary {
            text.push(' ');
        }
        collect_text(child, text);
        if boundary {
            text.push(' ');
        }
    }
}

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags
/// - `<link rel="canonical" href="...">`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
///
/// Relative links are resolved against `base_url`. The result is normalized
/// and deduplicated within the page, in document order.
///
/// # Example
///
/// ```
/// use url::Url;
/// use wordsmith::crawler::extract_links;
///
/// let html = r#"<a href="/page">Link</a><a href="/page#top">Again</a>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let mut push = |href: &str| {
        if let Some(url) = resolve_link(href, base_url) {
            if seen.insert(url.as_str().to_string()) {
                links.push(url);
            }
        }
    };

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                push(href);
            }
        }
    }

    if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical_selector) {
            if let Some(href) = element.value().attr("href") {
                push(href);
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    normalize_parsed(absolute_url).ok()
}
