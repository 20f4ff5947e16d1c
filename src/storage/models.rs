//! Record types produced by extraction and persisted by the store
//!
//! These mirror the on-disk JSON layout exactly: one document per page with
//! `title`, `url`, `content`, `endpoints` and `schemas`, plus a single
//! `site_info.json` per data directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One extracted API operation (path + method + docs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Endpoint path, e.g. `/users/{id}`. Records with an empty path are
    /// discarded before they reach storage.
    pub path: String,

    /// HTTP method (GET/POST/PUT/DELETE/PATCH) or empty when not detected
    pub method: String,

    /// Free-text description, possibly empty
    pub description: String,

    /// Parameters in document order
    pub parameters: Vec<ParameterRecord>,

    /// Responses in document order
    pub responses: Vec<ResponseRecord>,

    /// URL of the page this endpoint was extracted from
    pub source_url: String,
}

/// A named parameter of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub required: bool,

    pub description: String,
}

/// One documented response of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// HTTP status code as written in the docs, e.g. "200"
    pub code: String,

    pub description: String,

    /// Inline response schema, when the docs nest one under the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResponseSchema>,
}

/// Inline schema attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub type_name: String,

    pub properties: Vec<PropertyRecord>,
}

/// One extracted data model / type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Schema name. Records with an empty name are discarded before storage.
    pub name: String,

    pub description: String,

    /// Properties in document order
    pub properties: Vec<PropertyRecord>,

    /// URL of the page this schema was extracted from
    pub source_url: String,
}

/// A named property of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub required: bool,

    pub description: String,
}

/// One crawled documentation page with everything extracted from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Unique key: the fragment-stripped page URL
    pub url: String,

    pub title: String,

    /// Raw HTML as fetched
    pub content: String,

    pub endpoints: Vec<EndpointRecord>,

    pub schemas: Vec<SchemaRecord>,

    pub last_crawled: DateTime<Utc>,
}

/// Site-level record, one per crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub base_url: String,

    pub title: String,

    pub last_crawled: DateTime<Utc>,
}
