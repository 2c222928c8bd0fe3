//! Integration tests for Data-Grab
//!
//! Crawls and jobs run against wiremock servers standing in for real sites.

mod crawl_tests;
mod job_tests;

use data_grab::config::CrawlerConfig;
use data_grab::crawler::{build_http_client, Crawler};
use wiremock::ResponseTemplate;

/// Crawler with default settings and a short timeout
pub fn test_crawler() -> Crawler {
    let config = CrawlerConfig {
        fetch_timeout_secs: 5,
        ..CrawlerConfig::default()
    };
    Crawler::new(build_http_client(&config).unwrap())
}

/// 200 response carrying an HTML body
pub fn html_page(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(format!("<html><body>{}</body></html>", body.into()))
}
