//! Crawl traversal tests: depth limits, dedup, filtering and failure records

use crate::{html_page, test_crawler};
use data_grab::crawler::{CrawlRequest, NoProgress, ERROR_TAG};
use data_grab::state::Progress;
use data_grab::OutputFormat;
use std::collections::HashSet;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn crawl_request(seed: &str, tags: &[&str], keyword: Option<&str>, depth: u8) -> CrawlRequest {
    CrawlRequest::new(
        seed,
        tags.iter().copied(),
        keyword.map(str::to_string),
        depth,
        OutputFormat::Csv,
    )
    .unwrap()
}

/// Mounts a seed page linking to /one, /two and /three
async fn mount_three_links(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/one">One</a> <a href="/two">Two</a> <a href="/three">Three</a>"#,
        ))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let server = MockServer::start().await;
    mount_three_links(&server).await;
    for child in ["/one", "/two", "/three"] {
        Mock::given(method("GET"))
            .and(path(child))
            .respond_with(html_page("child"))
            .expect(0)
            .mount(&server)
            .await;
    }

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 0), &NoProgress)
        .await;

    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.records.len(), 3);
    assert!(outcome.records.iter().all(|r| r.source_url == seed));

    let targets: Vec<&str> = outcome.records.iter().map(|r| r.attribute.as_str()).collect();
    assert_eq!(
        targets,
        vec![
            format!("{}/one", server.uri()),
            format!("{}/two", server.uri()),
            format!("{}/three", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_depth_one_fetches_each_child_once() {
    let server = MockServer::start().await;
    mount_three_links(&server).await;
    for child in ["/one", "/two", "/three"] {
        // Every child links back to the seed and to a sibling
        Mock::given(method("GET"))
            .and(path(child))
            .respond_with(html_page(r#"<a href="/">Home</a> <a href="/one">One</a>"#))
            .expect(1)
            .mount(&server)
            .await;
    }

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 1), &NoProgress)
        .await;

    assert_eq!(outcome.pages_visited, 4);
    assert_eq!(outcome.records.len(), 3 + 3 * 2);
    assert!(outcome.records.iter().all(|r| !r.is_error()));

    let sources: HashSet<&str> = outcome.records.iter().map(|r| r.source_url.as_str()).collect();
    assert_eq!(sources.len(), 4);
}

#[tokio::test]
async fn test_links_beyond_depth_are_not_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/level1">L1</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html_page(r#"<a href="/level2">L2</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page(r#"<a href="/level3">L3</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level3"))
        .respond_with(html_page("too deep"))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 2), &NoProgress)
        .await;

    assert_eq!(outcome.pages_visited, 3);
    // The level2 page still reports its link to level3 as a record
    assert!(outcome
        .records
        .iter()
        .any(|r| r.attribute.ends_with("/level3")));
}

#[tokio::test]
async fn test_fragments_do_not_cause_revisits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/doc#intro">Intro</a> <a href="/doc#usage">Usage</a> <a href="/doc">Doc</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(html_page("<p>docs</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 1), &NoProgress)
        .await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.records.len(), 3);
}

#[tokio::test]
async fn test_keyword_filter_is_case_insensitive_over_text_and_attribute() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/fruit/apple">Red fruit</a>
               <a href="/b">Banana</a>
               <a href="/c">Apple Pie</a>
               <h1>Nothing here</h1>"#,
        ))
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(
            &crawl_request(&seed, &["a", "h1"], Some("APPLE"), 0),
            &NoProgress,
        )
        .await;

    let texts: Vec<&str> = outcome.records.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Red fruit", "Apple Pie"]);
}

#[tokio::test]
async fn test_multiple_tags_and_image_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<h1>  Welcome   home </h1>
               <img src="/static/logo.png" alt="logo">
               <p>First <b>bold</b> paragraph</p>"#,
        ))
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["h1", "img", "p"], None, 0), &NoProgress)
        .await;

    assert_eq!(outcome.records.len(), 3);

    let heading = &outcome.records[0];
    assert_eq!(heading.tag, "h1");
    assert_eq!(heading.text, "Welcome   home");
    assert_eq!(heading.attribute, heading.text);

    let image = &outcome.records[1];
    assert_eq!(image.tag, "img");
    assert_eq!(image.attribute, format!("{}/static/logo.png", server.uri()));

    let paragraph = &outcome.records[2];
    assert_eq!(paragraph.tag, "p");
    assert_eq!(paragraph.text, "First bold paragraph");
}

#[tokio::test]
async fn test_http_error_becomes_record_and_crawl_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/missing">Gone</a> <a href="/ok">Ok</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page(r#"<a href="/">Back</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 1), &NoProgress)
        .await;

    assert_eq!(outcome.pages_visited, 3);
    let errors: Vec<_> = outcome.records.iter().filter(|r| r.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].tag, ERROR_TAG);
    assert_eq!(errors[0].source_url, format!("{}/missing", server.uri()));
    assert_eq!(errors[0].text, "HTTP Error: 404");
    assert_eq!(
        errors[0].attribute,
        "Could not access URL. Check URL or network."
    );
    assert_eq!(outcome.records.len(), 4);
}

#[tokio::test]
async fn test_invalid_seed_yields_connection_error_record() {
    let outcome = test_crawler()
        .crawl(&crawl_request("not a url", &["a"], None, 0), &NoProgress)
        .await;

    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.records[0].is_error());
    assert_eq!(outcome.records[0].text, "Connection Error");
    assert_eq!(outcome.records[0].source_url, "not a url");
}

#[tokio::test]
async fn test_progress_stays_within_bounds() {
    let server = MockServer::start().await;
    mount_three_links(&server).await;
    for child in ["/one", "/two", "/three"] {
        Mock::given(method("GET"))
            .and(path(child))
            .respond_with(html_page(r#"<a href="/four">Four</a>"#))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/four"))
        .respond_with(html_page("end"))
        .mount(&server)
        .await;

    let snapshots: Mutex<Vec<Progress>> = Mutex::new(Vec::new());
    let observer = |progress: Progress| snapshots.lock().unwrap().push(progress);

    let seed = format!("{}/", server.uri());
    let outcome = test_crawler()
        .crawl(&crawl_request(&seed, &["a"], None, 2), &observer)
        .await;

    let snapshots = snapshots.into_inner().unwrap();
    assert_eq!(outcome.pages_visited, 5);
    assert_eq!(snapshots.len(), 10);
    assert!(snapshots.iter().all(|p| p.percentage <= 100));
    assert!(snapshots.iter().all(|p| p.message.starts_with("Scraping page ")));

    // /four is queued once per child, so stale entries keep the estimate below 100
    let last = snapshots.last().unwrap();
    assert!(last.percentage < 100);
    assert_eq!(last.pages_processed, 5);
    assert_eq!(last.total_items, outcome.records.len());
}
