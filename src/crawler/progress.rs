//! Progress reporting seam between the crawl loop and its owner

use crate::state::Progress;

/// Receives progress snapshots while a crawl runs
///
/// Called from the crawl loop after every page is dequeued and after its
/// records are collected. Implementations must return quickly.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

/// Observer that discards every snapshot
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress)
    }
}
