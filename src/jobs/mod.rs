//! Jobs module for background crawls and synchronous conversions

mod orchestrator;

pub use orchestrator::{
    is_input_error, JobOrchestrator, StoredFile, CONVERSION_FAILED_MESSAGE, NO_DATA_MESSAGE,
};
