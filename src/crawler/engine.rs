//! Crawl engine - the breadth-first traversal loop
//!
//! This module drives one crawl from seed to exhausted frontier:
//! - Dequeuing URLs in discovery order and enforcing the depth limit
//! - Fetching each page and turning failures into `Error` records
//! - Extracting elements, applying the keyword filter, queueing links
//! - Publishing progress snapshots after every step

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::frontier::{Frontier, QueueEntry};
use crate::crawler::parser::extract_elements;
use crate::crawler::progress::ProgressObserver;
use crate::crawler::record::ExtractedRecord;
use crate::crawler::request::CrawlRequest;
use crate::state::Progress;
use reqwest::Client;
use url::Url;

/// Result of a finished crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Records in the order they were produced, error records included
    pub records: Vec<ExtractedRecord>,

    /// Distinct pages dequeued and fetched
    pub pages_visited: usize,
}

/// Runs breadth-first crawls with a shared HTTP client
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
}

impl Crawler {
    /// Creates a crawler using an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Crawls from the request's seed until the frontier is exhausted
    ///
    /// A page that fails to load never aborts the crawl: it contributes a
    /// single `Error` record and the loop moves on. There is no overall
    /// timeout; each fetch is bounded by the client's timeout.
    ///
    /// # Arguments
    ///
    /// * `request` - Seed, tags, filter and depth limit
    /// * `observer` - Receives progress snapshots
    ///
    /// # Returns
    ///
    /// All records produced, possibly none
    pub async fn crawl(
        &self,
        request: &CrawlRequest,
        observer: &dyn ProgressObserver,
    ) -> CrawlOutcome {
        let mut frontier = Frontier::new(request.url(), request.depth());
        let mut records: Vec<ExtractedRecord> = Vec::new();

        while let Some(entry) = frontier.next_unvisited() {
            let pages = frontier.visited_count();
            tracing::debug!("Processing URL: {} (depth {})", entry.url, entry.depth);

            observer.on_progress(Progress {
                percentage: frontier.percentage(),
                message: format!("Scraping page {}...", pages),
                pages_processed: pages,
                total_items: records.len(),
            });

            let page_records = self.process_page(request, &entry, &mut frontier).await;
            records.extend(page_records);

            observer.on_progress(Progress {
                percentage: frontier.percentage(),
                message: format!("Scraping page {}...", pages),
                pages_processed: pages,
                total_items: records.len(),
            });
        }

        tracing::info!(
            "Crawl of {} finished: {} pages, {} records",
            request.url(),
            frontier.visited_count(),
            records.len()
        );

        CrawlOutcome {
            records,
            pages_visited: frontier.visited_count(),
        }
    }

    /// Fetches one page and produces its records, queueing discovered links
    async fn process_page(
        &self,
        request: &CrawlRequest,
        entry: &QueueEntry,
        frontier: &mut Frontier,
    ) -> Vec<ExtractedRecord> {
        let (final_url, body) = match fetch_page(&self.client, &entry.url).await {
            FetchOutcome::Success {
                final_url, body, ..
            } => (final_url, body),
            FetchOutcome::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, entry.url);
                return vec![ExtractedRecord::error(
                    &entry.url,
                    format!("HTTP Error: {}", status_code),
                    "Could not access URL. Check URL or network.",
                )];
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, error);
                return vec![ExtractedRecord::error(
                    &entry.url,
                    "Connection Error",
                    error,
                )];
            }
            FetchOutcome::Unexpected { error } => {
                tracing::warn!("Failed to read {}: {}", entry.url, error);
                return vec![ExtractedRecord::error(
                    &entry.url,
                    "Unexpected Error",
                    error,
                )];
            }
        };

        // The parsed document is not Send; keep it out of any await
        match extract_page(request, entry, &final_url, &body, frontier) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", entry.url, e);
                vec![ExtractedRecord::error(&entry.url, "Unexpected Error", e)]
            }
        }
    }
}

/// Extracts and filters the records of a fetched page, queueing its links
///
/// Links are queued whether or not their record passes the keyword filter.
fn extract_page(
    request: &CrawlRequest,
    entry: &QueueEntry,
    page_url: &Url,
    body: &str,
    frontier: &mut Frontier,
) -> Result<Vec<ExtractedRecord>, String> {
    let elements = extract_elements(body, page_url, request.tags())?;
    let mut records = Vec::new();

    for element in elements {
        if element.is_link {
            frontier.enqueue_link(&element.attribute, entry.depth);
        }

        if !request.matches_filter(&element.text, &element.attribute) {
            continue;
        }

        records.push(ExtractedRecord {
            source_url: entry.url.clone(),
            tag: element.tag,
            text: element.text,
            attribute: element.attribute,
        });
    }

    Ok(records)
}
