//! Validated crawl job parameters

use crate::crawler::parser::is_valid_tag_name;
use crate::output::OutputFormat;
use crate::GrabError;

/// Deepest link-hop count a crawl may follow from its seed
pub const MAX_CRAWL_DEPTH: u8 = 2;

/// Parameters of one crawl job; immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: String,
    tags: Vec<String>,
    filter_keyword: Option<String>,
    depth: u8,
    format: OutputFormat,
}

impl CrawlRequest {
    /// Validates and normalizes crawl parameters
    ///
    /// # Arguments
    ///
    /// * `url` - Seed URL; must be non-empty
    /// * `tags` - Tag names to extract; trimmed, lower-cased, empties dropped
    /// * `filter_keyword` - Optional case-insensitive keyword; blank means none
    /// * `depth` - Link hops to follow, 0 to `MAX_CRAWL_DEPTH`
    /// * `format` - Output format of the generated file
    ///
    /// # Errors
    ///
    /// `GrabError::InvalidRequest` for a blank URL, no usable tags, a tag that
    /// is not a plain element name, or a depth above the limit.
    pub fn new<I, S>(
        url: impl Into<String>,
        tags: I,
        filter_keyword: Option<String>,
        depth: u8,
        format: OutputFormat,
    ) -> Result<Self, GrabError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(GrabError::InvalidRequest("URL is required.".to_string()));
        }

        let tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        if tags.is_empty() {
            return Err(GrabError::InvalidRequest(
                "At least one tag is required.".to_string(),
            ));
        }
        if let Some(tag) = tags.iter().find(|tag| !is_valid_tag_name(tag)) {
            return Err(GrabError::InvalidRequest(format!(
                "'{}' is not a valid tag name.",
                tag
            )));
        }

        if depth > MAX_CRAWL_DEPTH {
            return Err(GrabError::InvalidRequest(format!(
                "Depth must be between 0 and {}.",
                MAX_CRAWL_DEPTH
            )));
        }

        let filter_keyword = filter_keyword
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty());

        Ok(Self {
            url,
            tags,
            filter_keyword,
            depth,
            format,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The lower-cased filter keyword, if any
    pub fn filter_keyword(&self) -> Option<&str> {
        self.filter_keyword.as_deref()
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns true if an element with this text and attribute passes the filter
    ///
    /// Matching is a case-insensitive substring search over `text + " " + attribute`.
    pub fn matches_filter(&self, text: &str, attribute: &str) -> bool {
        match &self.filter_keyword {
            None => true,
            Some(keyword) => format!("{} {}", text, attribute)
                .to_lowercase()
                .contains(keyword.as_str()),
        }
    }
}
