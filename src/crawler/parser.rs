//! HTML parser for extracting tagged elements
//!
//! This module selects every element matching the requested tag names and
//! turns each into text plus an "attribute" value:
//! - `<a href>`: the link target resolved against the page URL
//! - `<img src>`: the image source resolved against the page URL
//! - anything else: the element text itself

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One matched element, before keyword filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedElement {
    /// Lower-case tag name of the element
    pub tag: String,

    /// Trimmed text content
    pub text: String,

    /// Resolved link/image URL, or the text for other tags
    pub attribute: String,

    /// True when `attribute` is a resolved `<a>` target
    pub is_link: bool,
}

/// Extracts all elements matching `tags` from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the document was served from, for resolving relative targets
/// * `tags` - Plain tag names to select (e.g. `a`, `img`, `h1`, `p`)
///
/// # Returns
///
/// * `Ok(Vec<ExtractedElement>)` - Matched elements in document order
/// * `Err(String)` - The tag list could not be turned into a selector
///
/// # Example
///
/// ```
/// use data_grab::crawler::extract_elements;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/about">About us</a></body></html>"#;
/// let page = Url::parse("https://example.com/index.html").unwrap();
/// let elements = extract_elements(html, &page, &["a".to_string()]).unwrap();
/// assert_eq!(elements[0].attribute, "https://example.com/about");
/// ```
pub fn extract_elements(
    html: &str,
    page_url: &Url,
    tags: &[String],
) -> Result<Vec<ExtractedElement>, String> {
    let selector = build_selector(tags)?;
    let document = Html::parse_document(html);

    let elements = document
        .select(&selector)
        .map(|element| describe_element(element, page_url))
        .collect();

    Ok(elements)
}

/// Returns true if `tag` is a bare element name usable in a selector
///
/// A letter followed by letters, digits or hyphens, so custom elements such
/// as `my-widget` are accepted while selector syntax is not.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Builds a selector matching any of the given tag names
fn build_selector(tags: &[String]) -> Result<Selector, String> {
    if tags.is_empty() {
        return Err("No tags to select".to_string());
    }

    let selector = tags.join(", ");
    Selector::parse(&selector).map_err(|e| format!("Invalid tag selector '{}': {:?}", selector, e))
}

fn describe_element(element: ElementRef<'_>, page_url: &Url) -> ExtractedElement {
    let tag = element.value().name().to_ascii_lowercase();
    let text = element_text(element);

    let target = match tag.as_str() {
        "a" => element.value().attr("href"),
        "img" => element.value().attr("src"),
        _ => None,
    };

    match target.and_then(|target| resolve_target(target, page_url)) {
        Some(resolved) => ExtractedElement {
            is_link: tag == "a",
            tag,
            text,
            attribute: resolved,
        },
        None => ExtractedElement {
            attribute: text.clone(),
            tag,
            text,
            is_link: false,
        },
    }
}

/// Collects the element's text nodes, each trimmed, joined by single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves an `href`/`src` value against the page URL
///
/// Empty values have no target. Non-HTTP schemes (`mailto:`, `javascript:`)
/// still resolve; the crawler only follows targets starting with `http`.
fn resolve_target(target: &str, page_url: &Url) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    page_url.join(target).ok().map(String::from)
}
