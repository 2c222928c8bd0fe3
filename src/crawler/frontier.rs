//! Breadth-first crawl frontier
//!
//! This module handles:
//! - The FIFO queue of URLs waiting to be fetched, each tagged with its depth
//! - The visited set guaranteeing a URL is processed at most once
//! - The completion estimate derived from both

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// The URL to fetch
    pub url: String,

    /// Link hops from the seed (seed = 0)
    pub depth: u8,
}

/// FIFO frontier plus visited set for one crawl
///
/// The frontier is owned by a single crawl loop. `mark_visited` is a
/// check-and-set, so dedup stays correct even if the loop is ever split
/// across workers behind a lock.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<QueueEntry>,
    visited: HashSet<String>,
    max_depth: u8,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn new(seed: impl Into<String>, max_depth: u8) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(QueueEntry {
            url: seed.into(),
            depth: 0,
        });

        Self {
            queue,
            visited: HashSet::new(),
            max_depth,
        }
    }

    /// Dequeues the next entry that is within depth and not yet visited,
    /// marking it visited
    ///
    /// Entries failing either check are discarded. Returns `None` once the
    /// queue is exhausted.
    pub fn next_unvisited(&mut self) -> Option<QueueEntry> {
        while let Some(entry) = self.queue.pop_front() {
            if entry.depth > self.max_depth {
                continue;
            }
            if self.mark_visited(&entry.url) {
                return Some(entry);
            }
        }
        None
    }

    /// Marks a URL visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(visit_key(url))
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(&visit_key(url))
    }

    /// Enqueues a link discovered on a page at `parent_depth`
    ///
    /// Only absolute `http(s)` targets that are not yet visited and whose depth
    /// stays within the limit are queued. Returns whether the link was queued.
    pub fn enqueue_link(&mut self, url: &str, parent_depth: u8) -> bool {
        let depth = parent_depth.saturating_add(1);
        if depth > self.max_depth || !url.starts_with("http") || self.is_visited(url) {
            return false;
        }

        self.queue.push_back(QueueEntry {
            url: url.to_string(),
            depth,
        });
        true
    }

    /// Number of entries still queued (duplicates included)
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Completion estimate: `visited / (visited + queued) * 100`
    ///
    /// Newly discovered links grow the denominator, so the value can go down
    /// between calls. Always within 0-100; 0 when nothing is known yet.
    pub fn percentage(&self) -> u8 {
        let visited = self.visited_count();
        let total = visited + self.queued();
        if total == 0 {
            return 0;
        }
        ((visited * 100) / total) as u8
    }
}

/// Key used for dedup: the URL without its fragment
///
/// `page#top` and `page#bottom` are the same document. Unparseable strings are
/// used verbatim.
fn visit_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        }
        Err(_) => url.to_string(),
    }
}
