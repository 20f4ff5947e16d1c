//! Endpoint detection and extraction
//!
//! Scans block-level sections whose class matches the endpoint keywords and
//! pulls path, method, description, parameters and responses out of each with
//! fixed positional heuristics.

use crate::extract::{
    class_of, contains_required, find_description, find_text_matching, find_type_text, MatcherSet,
    Selectors,
};
use crate::storage::{EndpointRecord, ParameterRecord, ResponseRecord, ResponseSchema};
use scraper::ElementRef;
use url::Url;

/// HTTP methods recognized by the method heuristic
const METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

/// Extracts all endpoint records from a page
///
/// Sections without a detectable path are dropped entirely; the same
/// operation documented in several sections yields several records.
pub(crate) fn extract_endpoints(
    root: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
    page_url: &Url,
) -> Vec<EndpointRecord> {
    root.select(&selectors.sections)
        .filter(|section| matchers.endpoint.matches(class_of(*section)))
        .filter_map(|section| extract_endpoint(section, selectors, matchers, page_url))
        .collect()
}

fn extract_endpoint(
    section: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
    page_url: &Url,
) -> Option<EndpointRecord> {
    // Path: first code/pre whose text contains a slash. No path, no record.
    let path = find_text_matching(section, &selectors.code_or_pre, |t| t.contains('/'))?;

    let method = find_text_matching(section, &selectors.code_or_span, |t| {
        METHODS.contains(&t.to_uppercase().as_str())
    })
    .map(|m| m.to_uppercase())
    .unwrap_or_default();

    let description = find_description(section, &selectors.desc_block, &matchers.description);

    let parameters = section
        .select(&selectors.sub_block)
        .filter(|block| matchers.parameter.matches(class_of(*block)))
        .filter_map(|block| extract_parameter(block, selectors, matchers))
        .collect();

    let responses = section
        .select(&selectors.sub_block)
        .filter(|block| matchers.response.matches(class_of(*block)))
        .filter_map(|block| extract_response(block, selectors, matchers))
        .collect();

    Some(EndpointRecord {
        path,
        method,
        description,
        parameters,
        responses,
        source_url: page_url.to_string(),
    })
}

fn extract_parameter(
    block: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
) -> Option<ParameterRecord> {
    let name = find_text_matching(block, &selectors.code_or_td, |t| !t.is_empty())?;

    Some(ParameterRecord {
        name,
        type_name: find_type_text(block, &selectors.code_or_td).unwrap_or_default(),
        required: contains_required(block),
        description: find_description(block, &selectors.text_cell, &matchers.description),
    })
}

fn extract_response(
    block: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
) -> Option<ResponseRecord> {
    // Status code: first all-digit code/td text. Responses without one are
    // dropped.
    let code = find_text_matching(block, &selectors.code_or_td, |t| {
        !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
    })?;

    Some(ResponseRecord {
        code,
        description: find_description(block, &selectors.text_cell, &matchers.description),
        schema: extract_response_schema(block, selectors, matchers),
    })
}

/// Extracts an inline schema nested under a response block, when present
fn extract_response_schema(
    block: ElementRef,
    selectors: &Selectors,
    matchers: &MatcherSet,
) -> Option<ResponseSchema> {
    let container = block
        .select(&selectors.schema_block)
        .find(|el| matchers.schema.matches(class_of(*el)))?;

    let properties = container
        .select(&selectors.sub_block)
        .filter(|el| matchers.property.matches(class_of(*el)))
        .filter_map(|el| {
            let name = find_text_matching(el, &selectors.code_or_td, |t| !t.is_empty())?;
            Some(crate::storage::PropertyRecord {
                name,
                type_name: find_type_text(el, &selectors.code_or_td).unwrap_or_default(),
                required: contains_required(el),
                description: find_description(el, &selectors.text_cell, &matchers.description),
            })
        })
        .collect();

    Some(ResponseSchema {
        type_name: find_type_text(container, &selectors.code_or_td)
            .unwrap_or_else(|| "object".to_string()),
        properties,
    })
}
