//! Crawl configuration
//!
//! Holds the knobs that shape a crawl run: which portal to talk to, how long
//! to pause between requests, and how long to wait for a response. There is
//! no config file; callers construct a `CrawlConfig` (usually via `Default`)
//! and hand it to the coordinator.

use std::time::Duration;
use url::Url;

/// Base URL of the catalog harvested when no other portal is specified
pub const DEFAULT_BASE_URL: &str = "https://data.nasa.gov";

/// Pause inserted before every request (be polite!)
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// How long a single request may take before it counts as failed
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root of the catalog; listing and relative links resolve against this
    pub base_url: Url,

    /// Fixed delay imposed before each network request
    pub request_delay: Duration,

    /// Request timeout for every GET
    pub request_timeout: Duration,
}

impl CrawlConfig {
    /// Creates a configuration for the given portal with default pacing
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        // The constant is statically known to be a valid URL
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrawlConfig::default();
        assert_eq!(config.base_url.as_str(), "https://data.nasa.gov/");
        assert_eq!(config.request_delay, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_custom_portal() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let config = CrawlConfig::new(base.clone());
        assert_eq!(config.base_url, base);
    }
}
