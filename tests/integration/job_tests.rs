//! Job lifecycle tests: submit, poll, convert, store

use crate::html_page;
use data_grab::config::Config;
use data_grab::crawler::CrawlRequest;
use data_grab::jobs::{JobOrchestrator, CONVERSION_FAILED_MESSAGE, NO_DATA_MESSAGE};
use data_grab::output::{read_delimited, Renderer};
use data_grab::state::TaskState;
use data_grab::storage::{MemoryArtifactStore, MemoryTaskRegistry};
use data_grab::{OutputError, OutputFormat, OutputResult, Table, TaskStatus};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator() -> JobOrchestrator {
    JobOrchestrator::new(
        &Config::default(),
        Arc::new(MemoryTaskRegistry::new()),
        Arc::new(MemoryArtifactStore::new()),
    )
    .unwrap()
}

/// Polls until the task leaves `in_progress`, checking every snapshot on the way
async fn wait_for_terminal(orchestrator: &JobOrchestrator, task_id: Uuid) -> TaskState {
    for _ in 0..200 {
        let state = orchestrator.tasks().get(&task_id);
        match state.status() {
            TaskStatus::InProgress => {
                let progress = state.progress().unwrap();
                assert!(progress.percentage <= 100);
            }
            _ => return state,
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("task {} did not finish", task_id);
}

/// Renderer that always reports a failure
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, _table: &Table) -> OutputResult<Vec<u8>> {
        Err(OutputError::Render {
            format: OutputFormat::Pdf,
            message: "out of space".to_string(),
        })
    }
}

/// Renderer that panics mid-job
struct PanickingRenderer;

impl Renderer for PanickingRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, _table: &Table) -> OutputResult<Vec<u8>> {
        panic!("renderer bug");
    }
}

fn failing_renderers(_format: OutputFormat) -> Box<dyn Renderer> {
    Box::new(FailingRenderer)
}

fn panicking_renderers(_format: OutputFormat) -> Box<dyn Renderer> {
    Box::new(PanickingRenderer)
}

/// Mounts a seed page with a single link
async fn mount_one_link(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/next">Next</a>"#))
        .mount(server)
        .await;
}

fn request(seed: &str, depth: u8, format: OutputFormat) -> CrawlRequest {
    CrawlRequest::new(seed, ["a"], None, depth, format).unwrap()
}

#[tokio::test]
async fn test_job_completes_with_downloadable_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/one">One</a> <a href="/two">Two</a>"#))
        .mount(&server)
        .await;

    let orchestrator = orchestrator();
    let seed = format!("{}/", server.uri());
    let task_id = orchestrator.submit(request(&seed, 0, OutputFormat::Csv));

    let (file_id, filename, total_items) = match wait_for_terminal(&orchestrator, task_id).await {
        TaskState::Completed {
            file_id,
            filename,
            summary,
        } => (file_id, filename, summary.total_items),
        other => panic!("unexpected state: {:?}", other),
    };
    assert_eq!(total_items, 2);
    assert!(filename.starts_with("output_"));
    assert!(filename.ends_with(".csv"));

    let artifact = orchestrator.artifacts().get(&file_id).unwrap();
    assert_eq!(artifact.mime_type, "text/csv");
    assert_eq!(artifact.filename, filename);

    let table = read_delimited(&artifact.bytes, b',').unwrap();
    assert_eq!(table.columns(), ["Source URL", "Tag", "Text", "Attribute"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0][2], "One");
    assert_eq!(table.rows()[1][3], format!("{}/two", server.uri()));
}

#[tokio::test]
async fn test_page_without_matches_fails_with_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<p>No links at all</p>"))
        .mount(&server)
        .await;

    let orchestrator = orchestrator();
    let seed = format!("{}/", server.uri());
    let task_id = orchestrator.submit(request(&seed, 1, OutputFormat::Json));

    let state = wait_for_terminal(&orchestrator, task_id).await;
    assert_eq!(
        state,
        TaskState::Failed {
            error: NO_DATA_MESSAGE.to_string()
        }
    );
    assert!(orchestrator.artifacts().is_empty());
}

#[tokio::test]
async fn test_error_only_crawl_still_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator();
    let seed = format!("{}/", server.uri());
    let task_id = orchestrator.submit(request(&seed, 2, OutputFormat::Json));

    let file_id = match wait_for_terminal(&orchestrator, task_id).await {
        TaskState::Completed {
            file_id, summary, ..
        } => {
            assert_eq!(summary.total_items, 1);
            file_id
        }
        other => panic!("unexpected state: {:?}", other),
    };

    let artifact = orchestrator.artifacts().get(&file_id).unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(rows[0]["Tag"], "Error");
    assert_eq!(rows[0]["Text"], "HTTP Error: 500");
}

#[tokio::test]
async fn test_concurrent_jobs_do_not_mix_results() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_page(r#"<a href="/alpha">Alpha</a>"#).set_delay(Duration::from_millis(200)),
        )
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/beta">Beta</a> <a href="/gamma">Gamma</a>"#,
        ))
        .mount(&second)
        .await;

    let orchestrator = orchestrator();
    let first_task = orchestrator.submit(request(&format!("{}/", first.uri()), 0, OutputFormat::Csv));
    let second_task =
        orchestrator.submit(request(&format!("{}/", second.uri()), 0, OutputFormat::Csv));
    assert_ne!(first_task, second_task);

    let mut contents = Vec::new();
    for (task_id, expected_items) in [(first_task, 1), (second_task, 2)] {
        match wait_for_terminal(&orchestrator, task_id).await {
            TaskState::Completed {
                file_id, summary, ..
            } => {
                assert_eq!(summary.total_items, expected_items);
                let artifact = orchestrator.artifacts().get(&file_id).unwrap();
                contents.push(String::from_utf8(artifact.bytes).unwrap());
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    assert!(contents[0].contains("Alpha"));
    assert!(!contents[0].contains(&second.uri()));
    assert!(contents[1].contains("Gamma"));
    assert!(!contents[1].contains(&first.uri()));
    assert_eq!(orchestrator.artifacts().len(), 2);
}

#[tokio::test]
async fn test_unknown_identifiers_read_as_not_found() {
    let orchestrator = orchestrator();
    assert_eq!(orchestrator.tasks().get(&Uuid::new_v4()), TaskState::NotFound);
    assert!(orchestrator.artifacts().get(&Uuid::new_v4()).is_none());
}

#[tokio::test]
async fn test_render_failure_fails_task() {
    let server = MockServer::start().await;
    mount_one_link(&server).await;

    let orchestrator = orchestrator().with_renderers(failing_renderers);
    let seed = format!("{}/", server.uri());
    let task_id = orchestrator.submit(request(&seed, 0, OutputFormat::Pdf));

    let state = wait_for_terminal(&orchestrator, task_id).await;
    assert_eq!(
        state,
        TaskState::Failed {
            error: CONVERSION_FAILED_MESSAGE.to_string()
        }
    );
    assert!(orchestrator.artifacts().is_empty());
}

#[tokio::test]
async fn test_panicking_job_fails_task() {
    let server = MockServer::start().await;
    mount_one_link(&server).await;

    let orchestrator = orchestrator().with_renderers(panicking_renderers);
    let seed = format!("{}/", server.uri());
    let task_id = orchestrator.submit(request(&seed, 0, OutputFormat::Pdf));

    match wait_for_terminal(&orchestrator, task_id).await {
        TaskState::Failed { error } => {
            assert!(error.starts_with("An unexpected error occurred: "));
        }
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(orchestrator.artifacts().is_empty());
}

#[tokio::test]
async fn test_oversized_cell_still_converts_to_xlsx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!("<p>{}</p>", "word ".repeat(8_000))))
        .mount(&server)
        .await;

    let orchestrator = orchestrator();
    let seed = format!("{}/", server.uri());
    let request = CrawlRequest::new(seed, ["p"], None, 0, OutputFormat::Xlsx).unwrap();
    let task_id = orchestrator.submit(request);

    match wait_for_terminal(&orchestrator, task_id).await {
        TaskState::Completed { summary, .. } => assert_eq!(summary.total_items, 1),
        other => panic!("unexpected state: {:?}", other),
    }
}
