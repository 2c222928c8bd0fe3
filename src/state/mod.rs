//! State module for tracking background job progress
//!
//! # Components
//!
//! - `TaskStatus`: Lifecycle tag of a job (in progress, completed, failed, not found)
//! - `TaskState`: The full snapshot a poller receives for a job
//! - `Progress`: Running crawl statistics published while a job is in progress

mod task_state;

// Re-export main types
pub use task_state::{Progress, TaskState, TaskStatus, TaskSummary};
