//! Per-run crawl state
//!
//! This module defines the visited-URL ledger. The set is created empty at
//! run start, owned by the coordinator, and passed by reference into fetcher
//! calls, so independent crawls in the same process never share state.

use std::collections::HashSet;

/// Tracks which URLs have already been fetched this run
///
/// Invariant: a URL is fetched over the network at most once per run. The set
/// only grows; entries are never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL as visited
    ///
    /// Returns `true` if the URL was not already present (i.e., this is the
    /// first visit).
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    /// Returns true if the URL has already been visited this run
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Number of URLs visited so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
