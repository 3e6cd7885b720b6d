//! Dataset record extraction
//!
//! Turns one dataset detail page into a structured record. Extraction never
//! fails: each field has a defined fallback, so a sparse or malformed page
//! still produces a complete record.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// Fallback title when a detail page carries no `<h1>`
const UNKNOWN_TITLE: &str = "Unknown Title";

/// One extracted dataset
///
/// Serializes to a single JSON object with exactly the documented keys;
/// `landing_page` becomes `null` when absent.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetRecord {
    /// The detail page address; primary identity of the record
    pub dataset_url: String,

    /// Dataset title, or "Unknown Title"
    pub title: String,

    /// Free-text description, empty if the page has none
    pub description: String,

    /// Tags in document order, empty entries dropped
    pub tags: Vec<String>,

    /// Resource download links, deduplicated in first-seen order
    pub resource_links: Vec<String>,

    /// Canonical external landing page, if listed in the metadata table
    pub landing_page: Option<String>,

    /// Pages this record's text came from; always just the detail URL
    pub text_sources: Vec<String>,
}

/// Extracts a complete record from a dataset detail page
///
/// # Arguments
///
/// * `url` - The detail page URL (recorded as identity and provenance)
/// * `document` - The parsed detail page
/// * `base` - Portal base URL for resolving relative resource links
pub fn extract_record(url: &str, document: &Html, base: &Url) -> DatasetRecord {
    DatasetRecord {
        dataset_url: url.to_string(),
        title: extract_title(document).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        description: extract_description(document).unwrap_or_default(),
        tags: extract_tags(document),
        resource_links: extract_resource_links(document, base),
        landing_page: extract_landing_page(document),
        text_sources: vec![url.to_string()],
    }
}

/// Collects an element's text content, trimmed
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Title: text of the first level-1 heading
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Description: text of the first notes block
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.notes").ok()?;
    document.select(&selector).next().map(element_text)
}

/// Tags: anchor texts inside the tag list, trimmed, empties dropped
fn extract_tags(document: &Html) -> Vec<String> {
    let mut tags = Vec::new();

    if let Ok(selector) = Selector::parse("ul.tag-list a") {
        for anchor in document.select(&selector) {
            let text = element_text(anchor);
            if !text.is_empty() {
                tags.push(text);
            }
        }
    }

    tags
}

/// Resource links: hrefs from the "Data and Resources" section
///
/// Each href is resolved against the portal base. A link is kept only if the
/// raw href was already absolute or the resolved URL contains a `/resource/`
/// path segment; this drops in-page anchors and nav links. Duplicates are
/// removed, keeping first-seen order.
fn extract_resource_links(document: &Html, base: &Url) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    if let Ok(selector) = Selector::parse("section#dataset-resources a[href]") {
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let is_absolute = href.starts_with("http://") || href.starts_with("https://");
            let Ok(resolved) = base.join(href) else {
                continue;
            };
            let resolved = resolved.to_string();
            if (is_absolute || resolved.contains("/resource/")) && !links.contains(&resolved) {
                links.push(resolved);
            }
        }
    }

    links
}

/// Landing page: scanned from the "Additional Info" metadata table
///
/// Looks at each row of the first striped table; a row counts when its label
/// cell (lowercased) contains "landing". The value is the anchor href in the
/// value cell if one exists, otherwise the cell's text. The scan does not
/// stop at the first hit: the last matching row wins.
fn extract_landing_page(document: &Html) -> Option<String> {
    let table_selector = Selector::parse("table.table-striped").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let label_selector = Selector::parse("th").ok()?;
    let value_selector = Selector::parse("td").ok()?;
    let anchor_selector = Selector::parse("a").ok()?;

    let table = document.select(&table_selector).next()?;
    let mut landing_page = None;

    for row in table.select(&row_selector) {
        let (Some(label_cell), Some(value_cell)) = (
            row.select(&label_selector).next(),
            row.select(&value_selector).next(),
        ) else {
            continue;
        };

        if !element_text(label_cell).to_lowercase().contains("landing") {
            continue;
        }

        let href = value_cell
            .select(&anchor_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty());

        landing_page = Some(match href {
            Some(href) => href.to_string(),
            None => element_text(value_cell),
        });
    }

    landing_page
}
