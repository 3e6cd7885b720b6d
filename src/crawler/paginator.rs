//! Listing paginator
//!
//! Walks the catalog's paginated listing for a tag and collects the detail
//! page URL of every dataset it finds. Pagination starts at page 1 and stops
//! at the first page that yields no links; a listing page that fails to fetch
//! contributes zero links and therefore also ends the walk.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{Fetcher, Pacer};
use crate::state::VisitedSet;
use scraper::{Html, Selector};
use url::Url;

/// Collects the full ordered list of dataset detail URLs for a tag
///
/// Fetches `{base}/dataset/?tags={tag}&page={n}` for n = 1, 2, ... and
/// accumulates the links each page yields, in document order. Links are not
/// deduplicated across pages; the fetcher's visited set makes a repeat cheap
/// later.
pub async fn collect_dataset_urls<P: Pacer>(
    fetcher: &mut Fetcher<P>,
    visited: &mut VisitedSet,
    config: &CrawlConfig,
    tag: &str,
) -> Vec<String> {
    let mut all_urls = Vec::new();
    let mut page = 1u32;

    loop {
        tracing::info!("listing page {}", page);
        let url = listing_url(&config.base_url, tag, page);

        let links = match fetcher.fetch(url.as_str(), visited).await.into_document() {
            Some(document) => dataset_links(&document, &config.base_url),
            None => Vec::new(),
        };

        if links.is_empty() {
            tracing::info!("no more datasets found on page {}", page);
            break;
        }

        tracing::info!(
            "found {} datasets (total so far: {})",
            links.len(),
            all_urls.len() + links.len()
        );
        all_urls.extend(links);
        page += 1;
    }

    all_urls
}

/// Builds the listing URL for one tag/page pair
fn listing_url(base: &Url, tag: &str, page: u32) -> Url {
    let mut url = base.clone();
    url.set_path("/dataset/");
    url.query_pairs_mut()
        .clear()
        .append_pair("tags", tag)
        .append_pair("page", &page.to_string());
    url
}

/// Extracts dataset detail URLs from a listing page, in document order
///
/// Dataset titles on the listing are anchors inside `h2.dataset-heading`
/// containers. An href is kept when it:
/// - starts with `/dataset/`
/// - is not the bare `/dataset/` root itself
/// - carries no query string
///
/// Kept hrefs are resolved to absolute URLs against the portal base.
pub(crate) fn dataset_links(document: &Html, base: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("h2.dataset-heading a") {
        for anchor in document.select(&selector) {
            let href = anchor.value().attr("href").unwrap_or("");
            if href.starts_with("/dataset/") && href != "/dataset/" && !href.contains('?') {
                if let Ok(absolute) = base.join(href) {
                    links.push(absolute.to_string());
                }
            }
        }
    }

    links
}
