//! Crawler module for catalog harvesting
//!
//! This module contains the core crawl logic, including:
//! - HTTP fetching with visited-set dedup and rate limiting
//! - Paginated listing traversal and link discovery
//! - Per-page record extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod paginator;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use extractor::{extract_record, DatasetRecord};
pub use fetcher::{build_http_client, FetchOutcome, Fetcher, FixedDelay, Pacer};
pub use paginator::collect_dataset_urls;
