//! Request handlers
//!
//! Validation failures answer with a short plain-text message and a 4xx
//! status; nothing internal is exposed beyond that message.

use crate::crawler::CrawlRequest;
use crate::jobs::is_input_error;
use crate::output::OutputFormat;
use crate::server::download::attachment_header;
use crate::server::AppState;
use crate::state::TaskState;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

static INDEX_PAGE: &str = include_str!("index.html");

// --- Request bodies ---

#[derive(Debug, Deserialize)]
pub struct ScrapeBody {
    url: Option<String>,
    format: Option<String>,
    tag: Option<String>,
    filter_keyword: Option<String>,
    depth: Option<DepthValue>,
}

/// Depth as sent by browsers (`"1"`) or by API clients (`1`)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DepthValue {
    Number(i64),
    Text(String),
}

impl DepthValue {
    fn to_depth(&self) -> Option<u8> {
        match self {
            Self::Number(n) => u8::try_from(*n).ok(),
            Self::Text(s) if s.trim().is_empty() => Some(0),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

// --- Helpers ---

fn bad_request(message: impl Into<String>) -> Response {
    let message = message.into();
    warn!(reason = %message, "Rejected request");
    (StatusCode::BAD_REQUEST, message).into_response()
}

fn parse_format(raw: Option<&str>) -> Result<OutputFormat, Response> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(bad_request("Output format is required.")),
    };
    raw.parse::<OutputFormat>()
        .map_err(|e| bad_request(e.to_string()))
}

// --- Handlers ---

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn start_scrape(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScrapeBody>,
) -> Response {
    let url = match body.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return bad_request("URL is required."),
    };

    let format = match parse_format(body.format.as_deref()) {
        Ok(format) => format,
        Err(response) => return response,
    };

    let depth = match body.depth.as_ref().map(DepthValue::to_depth) {
        None => 0,
        Some(Some(depth)) => depth,
        Some(None) => return bad_request("Depth must be a number between 0 and 2."),
    };

    let tags: Vec<String> = match body.tag.as_deref() {
        Some(list) if !list.trim().is_empty() => list.split(',').map(str::to_string).collect(),
        _ => state.default_tags.clone(),
    };

    let request = match CrawlRequest::new(url, tags, body.filter_keyword, depth, format) {
        Ok(request) => request,
        Err(crate::GrabError::InvalidRequest(message)) => return bad_request(message),
        Err(e) => return bad_request(e.to_string()),
    };

    let task_id = state.orchestrator.submit(request);
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "processing", "task_id": task_id })),
    )
        .into_response()
}

pub async fn convert_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut format_field: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed upload");
                return (e.status(), e.body_text()).into_response();
            }
        };

        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                    Err(e) => {
                        warn!(error = %e, "Failed to read uploaded file");
                        return (e.status(), e.body_text()).into_response();
                    }
                }
            }
            Some("format") => match field.text().await {
                Ok(text) => format_field = Some(text),
                Err(e) => return (e.status(), e.body_text()).into_response(),
            },
            _ => {}
        }
    }

    let (filename, bytes) = match upload {
        Some(upload) => upload,
        None => return bad_request("No file part in the request."),
    };
    if filename.is_empty() {
        return bad_request("No selected file.");
    }

    let format = match parse_format(format_field.as_deref()) {
        Ok(format) => format,
        Err(response) => return response,
    };

    match state.orchestrator.convert_upload(&filename, &bytes, format) {
        Ok(stored) => Json(serde_json::json!({
            "status": "success",
            "file_id": stored.file_id,
            "filename": stored.filename,
        }))
        .into_response(),
        Err(crate::GrabError::InvalidRequest(message)) => bad_request(message),
        Err(e) if is_input_error(&e) => {
            bad_request(format!("Error processing the CSV file: {}", e))
        }
        Err(e) => {
            warn!(error = %e, "Failed to convert upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                crate::jobs::CONVERSION_FAILED_MESSAGE,
            )
                .into_response()
        }
    }
}

pub async fn task_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Response {
    let task_state = match Uuid::parse_str(&task_id) {
        Ok(id) => state.orchestrator.tasks().get(&id),
        Err(_) => TaskState::NotFound,
    };

    match task_state {
        TaskState::NotFound => (StatusCode::NOT_FOUND, Json(TaskState::NotFound)).into_response(),
        other => Json(other).into_response(),
    }
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Response {
    let artifact = Uuid::parse_str(&file_id)
        .ok()
        .and_then(|id| state.orchestrator.artifacts().get(&id));

    match artifact {
        Some(artifact) => (
            [
                (header::CONTENT_TYPE, artifact.mime_type),
                (
                    header::CONTENT_DISPOSITION,
                    attachment_header(&artifact.filename),
                ),
            ],
            artifact.bytes,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "File not found.").into_response(),
    }
}
