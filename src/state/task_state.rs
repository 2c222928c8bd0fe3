/// Task state definitions for tracking background job lifecycles
///
/// This module defines every status a job can report to a poller, and the
/// snapshot data carried by each status.
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a background job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    // ===== Active States =====
    /// Job is running; progress snapshots are being published
    InProgress,

    // ===== Terminal States =====
    /// Job produced an artifact
    Completed,

    /// Job ended without producing an artifact
    Failed,

    // ===== Special States =====
    /// No job is registered under the requested identifier
    NotFound,
}

impl TaskStatus {
    /// Returns true if a task in this status may move to `next`
    ///
    /// Only `InProgress` tasks move, either to another progress snapshot or to a
    /// terminal status. `NotFound` is a read-side answer, never a stored state.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (Self::InProgress, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Failed)
        )
    }

    /// Converts the status to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress snapshot published while a crawl runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Heuristic completion estimate, 0-100. Not monotonic.
    pub percentage: u8,

    /// Human-readable status line
    pub message: String,

    /// Pages dequeued and visited so far
    pub pages_processed: usize,

    /// Records (including error records) collected so far
    pub total_items: usize,
}

impl Progress {
    /// Snapshot for a job that has not visited any page yet
    pub fn initializing() -> Self {
        Self {
            percentage: 0,
            message: "Initializing...".to_string(),
            pages_processed: 0,
            total_items: 0,
        }
    }
}

/// Summary attached to a completed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total_items: usize,
}

/// Everything a poller can learn about a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskState {
    InProgress {
        progress: Progress,
    },
    Completed {
        file_id: Uuid,
        filename: String,
        summary: TaskSummary,
    },
    Failed {
        error: String,
    },
    NotFound,
}

impl TaskState {
    /// State of a freshly registered task
    pub fn started() -> Self {
        Self::InProgress {
            progress: Progress::initializing(),
        }
    }

    /// Returns the status tag of this state
    pub fn status(&self) -> TaskStatus {
        match self {
            Self::InProgress { .. } => TaskStatus::InProgress,
            Self::Completed { .. } => TaskStatus::Completed,
            Self::Failed { .. } => TaskStatus::Failed,
            Self::NotFound => TaskStatus::NotFound,
        }
    }

    /// Returns the progress snapshot if the task is still running
    pub fn progress(&self) -> Option<&Progress> {
        match self {
            Self::InProgress { progress } => Some(progress),
            _ => None,
        }
    }
}
