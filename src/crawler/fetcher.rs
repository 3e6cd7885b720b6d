//! HTTP fetcher implementation
//!
//! This module handles all network access for the crawl, including:
//! - Building the HTTP client with timeouts
//! - Visited-set deduplication (each URL is requested at most once per run)
//! - Rate limiting via an injected pacer
//! - Parsing response bodies into queryable documents
//! - Absorbing transport-level errors so callers never see them as faults

use crate::state::VisitedSet;
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
///
/// Callers treat `AlreadyVisited` and `TransportError` identically (no
/// document was produced); the distinction only matters for logging.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched and parsed into a queryable document
    Document(Html),

    /// The URL was fetched earlier in this run; no request was made
    AlreadyVisited,

    /// The request failed at the transport level (connection error, timeout,
    /// or non-2xx status)
    TransportError(String),
}

impl FetchOutcome {
    /// Converts the outcome into the document, if one was produced
    pub fn into_document(self) -> Option<Html> {
        match self {
            FetchOutcome::Document(document) => Some(document),
            FetchOutcome::AlreadyVisited | FetchOutcome::TransportError(_) => None,
        }
    }
}

/// Controls the spacing between outgoing requests
///
/// The fetcher awaits `pause` before every request it issues, so the pacer
/// decides the crawl's request rate. Injected as a collaborator so the pacing
/// policy can change (e.g., to a token bucket) without touching the fetcher.
pub trait Pacer {
    /// Resolves once the next request is allowed to depart
    fn pause(&mut self) -> impl Future<Output = ()>;
}

/// Pacer that sleeps for a fixed interval before every request
#[derive(Debug, Clone)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    /// Creates a pacer with the given inter-request interval
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Pacer for FixedDelay {
    async fn pause(&mut self) {
        tokio::time::sleep(self.interval).await;
    }
}

/// Builds the HTTP client used for the whole run
///
/// # Arguments
///
/// * `timeout` - Per-request timeout; requests exceeding it count as failed
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with dedup and rate limiting
///
/// Wraps the HTTP client together with the pacing policy. The visited set is
/// not owned here; the caller passes it into each `fetch` so the same fetcher
/// can serve multiple independent crawls.
pub struct Fetcher<P: Pacer> {
    client: Client,
    pacer: P,
}

impl<P: Pacer> Fetcher<P> {
    /// Creates a fetcher from a client and a pacing policy
    pub fn new(client: Client, pacer: P) -> Self {
        Self { client, pacer }
    }

    /// Fetches a URL and parses the body into a queryable document
    ///
    /// # Request flow
    ///
    /// 1. If `url` is already in the visited set, return `AlreadyVisited`
    ///    without touching the network (and without pausing).
    /// 2. Record `url` as visited, await the pacer, then issue the GET.
    /// 3. Any transport error, timeout, or non-2xx status becomes
    ///    `TransportError`; nothing is raised.
    /// 4. On success, parse the body and return `Document`.
    ///
    /// The visited-set entry is made before the request, so a URL that fails
    /// is not retried later in the run.
    pub async fn fetch(&mut self, url: &str, visited: &mut VisitedSet) -> FetchOutcome {
        if !visited.insert(url) {
            tracing::debug!("skip (already visited): {}", url);
            return FetchOutcome::AlreadyVisited;
        }

        self.pacer.pause().await;
        tracing::info!("fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("failed to fetch {}: {}", url, e);
                return FetchOutcome::TransportError(e.to_string());
            }
        };

        // Non-2xx statuses are soft failures, same as a connection error
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("failed to fetch {}: {}", url, e);
                return FetchOutcome::TransportError(e.to_string());
            }
        };

        match response.text().await {
            Ok(body) => FetchOutcome::Document(Html::parse_document(&body)),
            Err(e) => {
                tracing::warn!("failed to read body from {}: {}", url, e);
                FetchOutcome::TransportError(e.to_string())
            }
        }
    }
}
