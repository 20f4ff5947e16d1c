//! Heuristic extraction pipeline
//!
//! Maps a fetched HTML document and its URL to typed endpoint records, schema
//! records, and outbound links. Extraction is pure: no I/O, no shared state,
//! and it never fails — malformed or missing substructure degrades to empty
//! strings and empty lists.

mod endpoint;
mod links;
mod matchers;
mod schema;

pub use matchers::{KeywordMatcher, MatcherSet};

use crate::storage::{EndpointRecord, SchemaRecord};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Everything extracted from a single page
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Page title: `<title>` text, else first `<h1>`, else empty
    pub title: String,

    pub endpoints: Vec<EndpointRecord>,

    pub schemas: Vec<SchemaRecord>,

    /// Same-host outbound links, fragment-stripped and deny-list filtered
    pub links: Vec<Url>,
}

/// Extracts records and links from a page
///
/// Pure function of its inputs: identical HTML and URL always produce the
/// same output.
pub fn extract(html: &str, page_url: &Url, matchers: &MatcherSet) -> Extraction {
    let document = Html::parse_document(html);
    let selectors = Selectors::new();
    let root = document.root_element();

    Extraction {
        title: extract_title(root, &selectors),
        endpoints: endpoint::extract_endpoints(root, &selectors, matchers, page_url),
        schemas: schema::extract_schemas(root, &selectors, matchers, page_url),
        links: links::extract_links(root, &selectors, page_url),
    }
}

/// Extracts the page title: `<title>` text, else first `<h1>`, else empty
fn extract_title(root: ElementRef, selectors: &Selectors) -> String {
    if let Some(title) = root.select(&selectors.title).next() {
        let text = element_text(title);
        if !text.is_empty() {
            return text;
        }
    }

    root.select(&selectors.h1)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Pre-parsed CSS selectors shared by the extraction passes
pub(crate) struct Selectors {
    pub title: Selector,
    pub h1: Selector,
    /// Block-level section candidates
    pub sections: Selector,
    /// Endpoint path candidates
    pub code_or_pre: Selector,
    /// HTTP method candidates
    pub code_or_span: Selector,
    /// Description candidates
    pub desc_block: Selector,
    /// Parameter/response/property block candidates
    pub sub_block: Selector,
    /// Name and type candidates inside sub-blocks
    pub code_or_td: Selector,
    /// Description candidates inside sub-blocks
    pub text_cell: Selector,
    /// Schema name candidates
    pub heading_or_code: Selector,
    /// Inline response schema candidates
    pub schema_block: Selector,
    pub anchors: Selector,
}

impl Selectors {
    pub(crate) fn new() -> Self {
        Self {
            title: parse_selector("title"),
            h1: parse_selector("h1"),
            sections: parse_selector("div, section"),
            code_or_pre: parse_selector("code, pre"),
            code_or_span: parse_selector("code, span"),
            desc_block: parse_selector("p, div"),
            sub_block: parse_selector("div, table"),
            code_or_td: parse_selector("code, td"),
            text_cell: parse_selector("p, td"),
            heading_or_code: parse_selector("h2, h3, h4, code"),
            schema_block: parse_selector("div, pre"),
            anchors: parse_selector("a[href]"),
        }
    }
}

fn parse_selector(s: &str) -> Selector {
    Selector::parse(s).unwrap_or_else(|_| panic!("invalid static selector: {}", s))
}

/// Collects and trims the text content of an element
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the element's class attribute, or empty when absent
pub(crate) fn class_of(element: ElementRef) -> &str {
    element.value().attr("class").unwrap_or("")
}

/// Required-flag heuristic: any descendant text node contains "required"
///
/// Known approximation carried over from the original heuristics: a sentence
/// that merely mentions the word "required" also trips this.
pub(crate) fn contains_required(element: ElementRef) -> bool {
    element
        .text()
        .any(|t| t.to_lowercase().contains("required"))
}

/// First descendant matched by `selector` whose trimmed text satisfies `pred`
pub(crate) fn find_text_matching<F>(
    scope: ElementRef,
    selector: &Selector,
    pred: F,
) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    scope
        .select(selector)
        .map(element_text)
        .find(|text| pred(text))
}

/// First descendant whose class matches `matcher`, as trimmed text
pub(crate) fn find_description(
    scope: ElementRef,
    selector: &Selector,
    matcher: &KeywordMatcher,
) -> String {
    scope
        .select(selector)
        .find(|el| matcher.matches(class_of(*el)))
        .map(element_text)
        .unwrap_or_default()
}

/// Type keywords recognized in parameter/property/schema type cells
pub(crate) const TYPE_KEYWORDS: &[&str] = &["string", "integer", "boolean", "array", "object"];

/// First descendant text mentioning one of the recognized type keywords
pub(crate) fn find_type_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    find_text_matching(scope, selector, |text| {
        let lower = text.to_lowercase();
        TYPE_KEYWORDS.iter().any(|t| lower.contains(t))
    })
}
