//! Datahound: a tagged dataset catalog harvester
//!
//! This crate implements a polite scraper for CKAN-style open data portals.
//! Given a tag, it walks the paginated dataset listing, visits each dataset's
//! detail page, extracts a structured record, and writes the records to a
//! JSONL file (one JSON object per line).

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Datahound operations
///
/// Transport-level failures (timeouts, connection errors, non-2xx responses)
/// and already-visited skips never surface here; the fetcher absorbs them and
/// the crawl continues. This type covers the faults that end the run, such as
/// an unwritable output path.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Datahound operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{run_crawl, Coordinator, CrawlReport, DatasetRecord};
pub use output::JsonlWriter;
pub use state::VisitedSet;
