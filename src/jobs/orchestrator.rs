//! Job orchestrator - runs crawl jobs in the background
//!
//! Each submitted crawl becomes an independent tokio task that moves its task
//! entry through the registry:
//!
//! ```text
//! in_progress ──crawl──> records? ──convert──> stored ──> completed
//!      │                   │ none       │ error
//!      └───────────────────┴────────────┴──────────────> failed
//! ```

use crate::config::Config;
use crate::crawler::{build_http_client, records_to_table, CrawlRequest, Crawler};
use crate::output::{
    convert_with, delimiter_for_filename, read_delimited, renderer_for, OutputFormat,
    RendererFactory,
};
use crate::state::Progress;
use crate::storage::{ArtifactStore, TaskStore};
use crate::{GrabError, OutputError};
use std::sync::Arc;
use uuid::Uuid;

/// Failure message for a crawl that produced no records at all
pub const NO_DATA_MESSAGE: &str = "No data found or scraping failed.";

/// Failure message for a crawl whose records could not be converted
pub const CONVERSION_FAILED_MESSAGE: &str = "Failed to create file.";

/// Handle to a stored artifact returned by conversions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_id: Uuid,
    pub filename: String,
}

/// Wires the crawler, the converter and both stores together
///
/// Cheap to clone; clones share the same stores and HTTP client.
#[derive(Clone)]
pub struct JobOrchestrator {
    crawler: Crawler,
    tasks: Arc<dyn TaskStore>,
    artifacts: Arc<dyn ArtifactStore>,
    filename_prefix: Arc<str>,
    renderers: RendererFactory,
}

impl JobOrchestrator {
    /// Creates an orchestrator with its own HTTP client
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built
    pub fn new(
        config: &Config,
        tasks: Arc<dyn TaskStore>,
        artifacts: Arc<dyn ArtifactStore>,
    ) -> Result<Self, GrabError> {
        let client = build_http_client(&config.crawler)?;
        Ok(Self {
            crawler: Crawler::new(client),
            tasks,
            artifacts,
            filename_prefix: Arc::from(config.output.filename_prefix.as_str()),
            renderers: renderer_for,
        })
    }

    /// Replaces the renderer lookup used for every conversion
    pub fn with_renderers(mut self, renderers: RendererFactory) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn tasks(&self) -> &Arc<dyn TaskStore> {
        &self.tasks
    }

    pub fn artifacts(&self) -> &Arc<dyn ArtifactStore> {
        &self.artifacts
    }

    /// Registers a crawl job and starts it in the background
    ///
    /// The task is visible as `in_progress` before this returns. Must be
    /// called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// The task identifier to poll
    pub fn submit(&self, request: CrawlRequest) -> Uuid {
        let task_id = Uuid::new_v4();
        self.tasks.create(task_id);
        tracing::info!(
            "Task {} submitted: {} (depth {}, tags {:?}, format {})",
            task_id,
            request.url(),
            request.depth(),
            request.tags(),
            request.format()
        );

        let orchestrator = self.clone();
        tokio::spawn(async move {
            orchestrator.supervise(task_id, request).await;
        });

        task_id
    }

    /// Runs a job in its own task so a panic still ends in a failed state
    async fn supervise(self, task_id: Uuid, request: CrawlRequest) {
        let worker = self.clone();
        let handle = tokio::spawn(async move { worker.run_job(task_id, request).await });

        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(format!("An unexpected error occurred: {}", e)),
        };

        match outcome {
            Ok(()) => {}
            Err(message) => {
                tracing::error!("Task {} failed: {}", task_id, message);
                if let Err(e) = self.tasks.fail(&task_id, message) {
                    tracing::warn!("Could not mark task {} failed: {}", task_id, e);
                }
            }
        }
    }

    /// Crawls, converts, stores, and completes the task
    ///
    /// Returns the failure message when the job cannot produce an artifact.
    async fn run_job(&self, task_id: Uuid, request: CrawlRequest) -> Result<(), String> {
        let tasks = Arc::clone(&self.tasks);
        let observer = move |progress: Progress| {
            if let Err(e) = tasks.update_progress(&task_id, progress) {
                tracing::warn!("Dropped progress update for task {}: {}", task_id, e);
            }
        };

        let outcome = self.crawler.crawl(&request, &observer).await;
        if outcome.records.is_empty() {
            return Err(NO_DATA_MESSAGE.to_string());
        }

        let total_items = outcome.records.len();
        let table = records_to_table(outcome.records);
        let renderer = (self.renderers)(request.format());
        let file = convert_with(renderer.as_ref(), &table, &self.filename_prefix).map_err(|e| {
            tracing::error!("Conversion failed for task {}: {}", task_id, e);
            CONVERSION_FAILED_MESSAGE.to_string()
        })?;

        let filename = file.filename.clone();
        let file_id = self.artifacts.put(file);

        self.tasks
            .complete(&task_id, file_id, filename, total_items)
            .map_err(|e| e.to_string())?;

        tracing::info!(
            "Task {} completed: {} items from {} pages, file {}",
            task_id,
            total_items,
            outcome.pages_visited,
            file_id
        );
        Ok(())
    }

    /// Converts an uploaded delimited file and stores the result
    ///
    /// Runs entirely on the caller's task; nothing is spawned.
    ///
    /// # Arguments
    ///
    /// * `upload_name` - Client-supplied filename, used to pick the delimiter
    /// * `bytes` - File content
    /// * `format` - Requested output format
    ///
    /// # Errors
    ///
    /// * `GrabError::InvalidRequest` - The file is not `.csv`/`.tsv`
    /// * `GrabError::Output` - The content does not parse or cannot be rendered
    pub fn convert_upload(
        &self,
        upload_name: &str,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<StoredFile, GrabError> {
        let delimiter = delimiter_for_filename(upload_name)
            .ok_or_else(|| GrabError::InvalidRequest("File is not a valid CSV.".to_string()))?;

        let table = read_delimited(bytes, delimiter)?;
        let renderer = (self.renderers)(format);
        let file = convert_with(renderer.as_ref(), &table, &self.filename_prefix)?;
        let filename = file.filename.clone();
        let file_id = self.artifacts.put(file);

        tracing::info!(
            "Converted upload '{}' ({} rows) to {} as {}",
            upload_name,
            table.len(),
            format,
            file_id
        );

        Ok(StoredFile { file_id, filename })
    }
}

/// Returns true if a conversion error was caused by the uploaded content
/// rather than by rendering
pub fn is_input_error(error: &GrabError) -> bool {
    match error {
        GrabError::InvalidRequest(_) => true,
        GrabError::Output(OutputError::InvalidInput(_))
        | GrabError::Output(OutputError::Csv(_))
        | GrabError::Output(OutputError::UnsupportedFormat(_)) => true,
        _ => false,
    }
}
