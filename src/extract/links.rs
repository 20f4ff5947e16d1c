//! Outbound link discovery and filtering

use crate::extract::Selectors;
use crate::url::{is_denied_path, same_host, strip_fragment};
use scraper::ElementRef;
use url::Url;

/// Collects crawlable links from a page
///
/// Keeps only same-host links, resolved to absolute form with the fragment
/// stripped. Anchors, javascript:/mailto: pseudo-links and deny-listed paths
/// are rejected. Duplicates within a page are kept; the frontier dedupes.
pub(crate) fn extract_links(root: ElementRef, selectors: &Selectors, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    for anchor in root.select(&selectors.anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            continue;
        }

        let Ok(resolved) = page_url.join(href) else {
            continue;
        };
        let resolved = strip_fragment(&resolved);

        if !same_host(page_url, &resolved) {
            continue;
        }

        if is_denied_path(&resolved) {
            continue;
        }

        links.push(resolved);
    }

    links
}
