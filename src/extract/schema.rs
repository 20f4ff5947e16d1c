//! Schema (data model) detection and extraction

use crate::extract::{
    class_of, contains_required, find_description, find_text_matching, find_type_text, MatcherSet,
    Selectors,
};
use crate::storage::{PropertyRecord, SchemaRecord};
use scraper::ElementRef;
use url::Url;

/// Extracts all schema records from a page
///
/// Sections without a detectable name are dropped; duplicates across sections
/// are preserved as-is.
pub(crate) fn extract_schemas(
    root: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
    page_url: &Url,
) -> Vec<SchemaRecord> {
    root.select(&selectors.sections)
        .filter(|section| matchers.schema.matches(class_of(*section)))
        .filter_map(|section| extract_schema(section, selectors, matchers, page_url))
        .collect()
}

fn extract_schema(
    section: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
    page_url: &Url,
) -> Option<SchemaRecord> {
    // Name: first non-blank h2/h3/h4/code. No name, no record.
    let name = find_text_matching(section, &selectors.heading_or_code, |t| !t.is_empty())?;

    let properties = section
        .select(&selectors.sub_block)
        .filter(|block| matchers.property.matches(class_of(*block)))
        .filter_map(|block| extract_property(block, selectors, matchers))
        .collect();

    Some(SchemaRecord {
        name,
        description: find_description(section, &selectors.desc_block, &matchers.description),
        properties,
        source_url: page_url.to_string(),
    })
}

fn extract_property(
    block: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
) -> Option<PropertyRecord> {
    let name = find_text_matching(block, &selectors.code_or_td, |t| !t.is_empty())?;

    Some(PropertyRecord {
        name,
        type_name: find_type_text(block, &selectors.code_or_td).unwrap_or_default(),
        required: contains_required(block),
        description: find_description(block, &selectors.text_cell, &matchers.description),
    })
}
