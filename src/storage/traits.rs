//! Storage traits for the artifact store and task registry
//!
//! Both stores are process-wide key-value services shared between background
//! jobs and request handlers. They expose point reads and writes only, never
//! iteration. Implementations must be thread-safe.

use crate::output::RenderedFile;
use crate::state::{Progress, TaskState};
use crate::StorageResult;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A generated file held for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: Uuid,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Trait for artifact store implementations
///
/// Artifacts are immutable once stored. Every `get` hands out an independent
/// copy of the payload, so one reader can never observe or corrupt what the
/// next reader receives.
pub trait ArtifactStore: Send + Sync {
    /// Stores a rendered file under a fresh random identifier
    ///
    /// # Returns
    ///
    /// The identifier to download the artifact with
    fn put(&self, file: RenderedFile) -> Uuid;

    /// Gets a copy of an artifact, or `None` if the identifier is unknown
    fn get(&self, id: &Uuid) -> Option<Artifact>;

    /// Number of stored artifacts
    fn len(&self) -> usize;

    /// Returns true if nothing has been stored yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for task registry implementations
///
/// A task starts `in_progress`, may receive any number of progress updates,
/// and ends in exactly one terminal state that never changes afterwards.
pub trait TaskStore: Send + Sync {
    /// Registers a new in-progress task with zero progress
    fn create(&self, id: Uuid);

    /// Replaces the progress snapshot of a running task
    ///
    /// # Errors
    ///
    /// * `StorageError::TaskNotFound` - The task was never created
    /// * `StorageError::InvalidTransition` - The task already reached a terminal state
    fn update_progress(&self, id: &Uuid, progress: Progress) -> StorageResult<()>;

    /// Marks a running task as completed
    ///
    /// # Arguments
    ///
    /// * `id` - The task identifier
    /// * `file_id` - The artifact produced by the job
    /// * `filename` - Suggested filename of the artifact
    /// * `total_items` - Number of records the job produced
    fn complete(
        &self,
        id: &Uuid,
        file_id: Uuid,
        filename: String,
        total_items: usize,
    ) -> StorageResult<()>;

    /// Marks a running task as failed with a human-readable message
    fn fail(&self, id: &Uuid, error: String) -> StorageResult<()>;

    /// Gets the current state of a task; unknown identifiers read as `NotFound`
    fn get(&self, id: &Uuid) -> TaskState;
}
