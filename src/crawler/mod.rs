//! Crawler module for bounded-depth element extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a per-page timeout
//! - HTML parsing and tagged-element extraction
//! - The breadth-first frontier with visited-set dedup
//! - The traversal loop with progress reporting and per-page failure records

mod engine;
mod fetcher;
mod frontier;
mod parser;
mod progress;
mod record;
mod request;

pub use engine::{CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::{Frontier, QueueEntry};
pub use parser::{extract_elements, is_valid_tag_name, ExtractedElement};
pub use progress::{NoProgress, ProgressObserver};
pub use record::{records_to_table, ExtractedRecord, ERROR_TAG, RECORD_COLUMNS};
pub use request::{CrawlRequest, MAX_CRAWL_DEPTH};
