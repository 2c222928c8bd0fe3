//! Records produced by a crawl

use crate::output::Table;

/// Column names of the crawl result table
pub const RECORD_COLUMNS: [&str; 4] = ["Source URL", "Tag", "Text", "Attribute"];

/// Tag value marking a page that could not be fetched or parsed
pub const ERROR_TAG: &str = "Error";

/// One row of crawl output
///
/// Either an element that passed the keyword filter, or an `Error` record
/// standing in for a page whose fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub source_url: String,
    pub tag: String,
    pub text: String,
    pub attribute: String,
}

impl ExtractedRecord {
    /// Builds an `Error` record for a page; `text` names the failure kind and
    /// `attribute` carries the detail
    pub fn error(
        source_url: impl Into<String>,
        text: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            tag: ERROR_TAG.to_string(),
            text: text.into(),
            attribute: attribute.into(),
        }
    }

    /// Returns true if this record reports a failed page
    pub fn is_error(&self) -> bool {
        self.tag == ERROR_TAG
    }

    fn into_row(self) -> Vec<String> {
        vec![self.source_url, self.tag, self.text, self.attribute]
    }
}

/// Converts crawl records into the four-column result table
pub fn records_to_table(records: Vec<ExtractedRecord>) -> Table {
    let mut table = Table::new(RECORD_COLUMNS);
    for record in records {
        // Width always matches RECORD_COLUMNS
        if let Err(e) = table.push_row(record.into_row()) {
            tracing::error!("Dropped malformed crawl record: {}", e);
        }
    }
    table
}
