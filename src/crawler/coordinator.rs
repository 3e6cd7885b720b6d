//! Crawl coordinator - main crawl orchestration logic
//!
//! Sequences the two phases of a run: collect every dataset URL for the tag
//! via the paginator, then visit each URL in discovery order, extracting a
//! record and writing it out. A dataset page that fails to fetch is counted
//! and skipped; the run never retries and never stops early.

use crate::config::CrawlConfig;
use crate::crawler::extractor::extract_record;
use crate::crawler::fetcher::{build_http_client, Fetcher, FixedDelay, Pacer};
use crate::crawler::paginator::collect_dataset_urls;
use crate::output::JsonlWriter;
use crate::state::VisitedSet;
use crate::HarvestError;
use std::path::Path;

/// Final counts for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Dataset URLs discovered across all listing pages
    pub discovered: usize,

    /// Records successfully extracted and written
    pub written: usize,

    /// Dataset pages that produced no document (transport failure or repeat)
    pub failed: usize,
}

/// Main crawl coordinator
///
/// Owns the per-run state (visited set, counters) and the fetcher. One
/// coordinator drives one run; independent coordinators never share state,
/// so several crawls can run in the same process.
pub struct Coordinator<P: Pacer> {
    config: CrawlConfig,
    fetcher: Fetcher<P>,
    visited: VisitedSet,
}

impl Coordinator<FixedDelay> {
    /// Creates a coordinator with the standard fixed-delay pacing
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        let pacer = FixedDelay::new(config.request_delay);
        Self::with_pacer(config, pacer)
    }
}

impl<P: Pacer> Coordinator<P> {
    /// Creates a coordinator with a caller-supplied pacing policy
    pub fn with_pacer(config: CrawlConfig, pacer: P) -> Result<Self, HarvestError> {
        let client = build_http_client(config.request_timeout)?;
        Ok(Self {
            config,
            fetcher: Fetcher::new(client, pacer),
            visited: VisitedSet::new(),
        })
    }

    /// Runs a complete crawl for one tag, writing records to `writer`
    ///
    /// Phase 1 drives the paginator to exhaustion; phase 2 visits each
    /// discovered URL in order. Only writer faults propagate; fetch failures
    /// are absorbed into the report's `failed` count.
    pub async fn run(
        &mut self,
        tag: &str,
        writer: &mut JsonlWriter,
    ) -> Result<CrawlReport, HarvestError> {
        tracing::info!("collecting dataset links for tag '{}'", tag);
        let urls =
            collect_dataset_urls(&mut self.fetcher, &mut self.visited, &self.config, tag).await;
        tracing::info!("total dataset links collected: {}", urls.len());

        let mut report = CrawlReport {
            discovered: urls.len(),
            ..CrawlReport::default()
        };

        for (i, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}] scraping {}", i + 1, urls.len(), url);

            match self.fetcher.fetch(url, &mut self.visited).await.into_document() {
                Some(document) => {
                    let record = extract_record(url, &document, &self.config.base_url);
                    writer.write(&record)?;
                    report.written += 1;
                    tracing::info!("saved: {}", truncate(&record.title, 60));
                }
                None => {
                    report.failed += 1;
                    tracing::warn!("failed to scrape {}, skipping", url);
                }
            }
        }

        writer.flush()?;
        tracing::info!(
            "crawl complete: {} discovered, {} written, {} failed",
            report.discovered,
            report.written,
            report.failed
        );

        Ok(report)
    }
}

/// Truncates a title for log lines, on a character boundary
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Runs a complete crawl and writes the JSONL output file
///
/// Convenience entry point used by the binary: opens the output sink in
/// truncate mode, runs the coordinator, and returns the final counts.
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `tag` - Catalog tag to harvest
/// * `out_path` - Output JSONL path; any existing file is replaced
pub async fn run_crawl(
    config: CrawlConfig,
    tag: &str,
    out_path: &Path,
) -> Result<CrawlReport, HarvestError> {
    let mut writer = JsonlWriter::create(out_path)?;
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(tag, &mut writer).await
}
