//! Server module exposing the crawl, convert, status and download endpoints
//!
//! # Routes
//!
//! - `GET /` - Index page with both forms
//! - `POST /start-scrape` - Submit a crawl job (JSON body)
//! - `POST /convert` - Convert an uploaded csv/tsv file (multipart)
//! - `GET /status/:task_id` - Poll a crawl job
//! - `GET /download/:file_id` - Fetch a generated file

mod download;
mod handlers;

pub use download::{attachment_header, sanitize_filename};

use crate::config::Config;
use crate::jobs::JobOrchestrator;
use crate::storage::{MemoryArtifactStore, MemoryTaskRegistry};
use crate::GrabError;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// State shared by every handler
pub struct AppState {
    pub orchestrator: JobOrchestrator,

    /// Tags used when a crawl request names none
    pub default_tags: Vec<String>,
}

impl AppState {
    /// Builds the state with fresh in-memory stores
    pub fn in_memory(config: &Config) -> Result<Self, GrabError> {
        let orchestrator = JobOrchestrator::new(
            config,
            Arc::new(MemoryTaskRegistry::new()),
            Arc::new(MemoryArtifactStore::new()),
        )?;
        Ok(Self {
            orchestrator,
            default_tags: config.crawler.default_tags.clone(),
        })
    }
}

/// Builds the router over the given state
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/start-scrape", post(handlers::start_scrape))
        .route("/convert", post(handlers::convert_file))
        .route("/status/:task_id", get(handlers::task_status))
        .route("/download/:file_id", get(handlers::download_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Builds the application router from configuration
pub fn app(config: &Config) -> Result<Router, GrabError> {
    let state = Arc::new(AppState::in_memory(config)?);
    Ok(router(state, config.server.max_upload_bytes))
}

/// Serves the application on an already bound listener until the process stops
pub async fn serve(config: &Config, listener: TcpListener) -> Result<(), GrabError> {
    let app = app(config)?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Data-Grab listening on http://{}", addr);
    }
    axum::serve(listener, app).await?;
    Ok(())
}
