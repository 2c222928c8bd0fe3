//! Storage module for job state and generated files
//!
//! This module holds the two process-wide key-value services:
//! - The artifact store, keyed by file identifier
//! - The task registry, keyed by task identifier
//!
//! State lives in memory only and is lost on restart.

mod memory;
mod traits;

pub use memory::{MemoryArtifactStore, MemoryTaskRegistry};
pub use traits::{Artifact, ArtifactStore, TaskStore};
