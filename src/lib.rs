//! Data-Grab: a web scraper and table converter
//!
//! This crate crawls a website to a bounded depth and extracts tagged elements
//! (links, images, headings, paragraphs), or converts an uploaded delimited file
//! into another tabular format. Both flows produce a downloadable artifact that is
//! retrieved later through an opaque handle.

pub mod config;
pub mod crawler;
pub mod jobs;
pub mod output;
pub mod server;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Data-Grab operations
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Errors raised while reading or rendering tabular data
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to render {format}: {message}")]
    Render {
        format: output::OutputFormat,
        message: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised by the task registry and artifact store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Task not found: {0}")]
    TaskNotFound(uuid::Uuid),

    #[error("Invalid task transition: {from} -> {to}")]
    InvalidTransition {
        from: state::TaskStatus,
        to: state::TaskStatus,
    },
}

/// Result type alias for Data-Grab operations
pub type Result<T> = std::result::Result<T, GrabError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for conversion operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Result type alias for registry and store operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlRequest, ExtractedRecord};
pub use jobs::JobOrchestrator;
pub use output::{OutputFormat, RenderedFile, Table};
pub use state::{TaskState, TaskStatus};
pub use storage::{ArtifactStore, MemoryArtifactStore, MemoryTaskRegistry, TaskStore};
