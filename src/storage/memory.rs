//! In-memory storage implementation
//!
//! This module provides mutex-guarded `HashMap` implementations of the
//! `ArtifactStore` and `TaskStore` traits. Entries live for the lifetime of the
//! process; there is no eviction.

use crate::output::RenderedFile;
use crate::state::{Progress, TaskState, TaskStatus, TaskSummary};
use crate::storage::traits::{Artifact, ArtifactStore, TaskStore};
use crate::{StorageError, StorageResult};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Locks a mutex, recovering the data if a previous holder panicked
///
/// Both stores only hold plain values, and every write replaces an entry in a
/// single statement, so a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Artifact store backed by a mutex-guarded map
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Mutex<HashMap<Uuid, Artifact>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&self, file: RenderedFile) -> Uuid {
        let id = Uuid::new_v4();
        let artifact = Artifact {
            id,
            bytes: file.bytes,
            mime_type: file.mime_type,
            filename: file.filename,
            created_at: Utc::now(),
        };

        lock(&self.artifacts).insert(id, artifact);
        tracing::debug!("Stored artifact {}", id);
        id
    }

    fn get(&self, id: &Uuid) -> Option<Artifact> {
        lock(&self.artifacts).get(id).cloned()
    }

    fn len(&self) -> usize {
        lock(&self.artifacts).len()
    }
}

/// Task registry backed by a single mutex-guarded map
///
/// One coarse lock covers every task; contention is limited to one progress
/// update per crawled page.
#[derive(Debug, Default)]
pub struct MemoryTaskRegistry {
    tasks: Mutex<HashMap<Uuid, TaskState>>,
}

impl MemoryTaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a transition to a stored task after checking it is allowed
    fn transition(&self, id: &Uuid, next: TaskState) -> StorageResult<()> {
        let mut tasks = lock(&self.tasks);
        let current = tasks.get_mut(id).ok_or(StorageError::TaskNotFound(*id))?;

        let from = current.status();
        let to = next.status();
        if !from.can_transition_to(to) {
            return Err(StorageError::InvalidTransition { from, to });
        }

        *current = next;
        Ok(())
    }
}

impl TaskStore for MemoryTaskRegistry {
    fn create(&self, id: Uuid) {
        lock(&self.tasks).insert(id, TaskState::started());
    }

    fn update_progress(&self, id: &Uuid, progress: Progress) -> StorageResult<()> {
        self.transition(id, TaskState::InProgress { progress })
    }

    fn complete(
        &self,
        id: &Uuid,
        file_id: Uuid,
        filename: String,
        total_items: usize,
    ) -> StorageResult<()> {
        self.transition(
            id,
            TaskState::Completed {
                file_id,
                filename,
                summary: TaskSummary { total_items },
            },
        )
    }

    fn fail(&self, id: &Uuid, error: String) -> StorageResult<()> {
        self.transition(id, TaskState::Failed { error })
    }

    fn get(&self, id: &Uuid) -> TaskState {
        lock(&self.tasks)
            .get(id)
            .cloned()
            .unwrap_or(TaskState::NotFound)
    }
}
