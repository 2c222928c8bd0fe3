//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler:
//! - Building the shared HTTP client with user agent and timeout
//! - GET requests with redirect following
//! - Classifying failures into the categories reported as error records

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: url::Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request never produced a response (connection refused, timeout, bad URL)
    NetworkError {
        /// Error description
        error: String,
    },

    /// A response arrived but could not be read
    Unexpected {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by every crawl
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent, per-page timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use data_grab::config::CrawlerConfig;
/// use data_grab::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the result
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx, body readable | `Success` |
/// | non-2xx status | `HttpError` |
/// | connect failure, timeout, invalid URL | `NetworkError` |
/// | body read/decode failure | `Unexpected` |
///
/// The client's timeout bounds the whole request including the body.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                format!("Request timed out: {}", e)
            } else {
                e.to_string()
            };
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) if e.is_timeout() => FetchOutcome::NetworkError {
            error: format!("Request timed out: {}", e),
        },
        Err(e) => FetchOutcome::Unexpected {
            error: e.to_string(),
        },
    }
}
