//! Query interface over stored crawl results
//!
//! Read-only lookups that scan the stored page documents. The scans are
//! linear over every stored page, which is fine at the few-hundred-page
//! scale a single crawl produces.

use crate::storage::{EndpointRecord, SchemaRecord, Storage};
use crate::Result;

/// A search hit: an endpoint plus the page it came from
#[derive(Debug, Clone)]
pub struct EndpointMatch {
    pub page_url: String,
    pub endpoint: EndpointRecord,
}

/// Finds endpoints whose path or description contains `query`
///
/// Matching is case-insensitive substring search, ordered by page URL.
pub fn search_endpoints(storage: &dyn Storage, query: &str) -> Result<Vec<EndpointMatch>> {
    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    for page_url in storage.list_page_urls()? {
        let Some(page) = storage.get_page(&page_url)? else {
            continue;
        };

        for endpoint in page.endpoints {
            if endpoint.path.to_lowercase().contains(&needle)
                || endpoint.description.to_lowercase().contains(&needle)
            {
                matches.push(EndpointMatch {
                    page_url: page_url.clone(),
                    endpoint,
                });
            }
        }
    }

    Ok(matches)
}

/// All endpoints extracted from the page stored under `url`
///
/// Returns `None` when no page is stored for that URL.
pub fn endpoints_for_url(storage: &dyn Storage, url: &str) -> Result<Option<Vec<EndpointRecord>>> {
    Ok(storage.get_page(url)?.map(|page| page.endpoints))
}

/// All schemas extracted from the page stored under `url`
pub fn schemas_for_url(storage: &dyn Storage, url: &str) -> Result<Option<Vec<SchemaRecord>>> {
    Ok(storage.get_page(url)?.map(|page| page.schemas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStore, PageRecord, SchemaRecord};
    use chrono::Utc;
    use tempfile::TempDir;

    fn endpoint(path: &str, method: &str, description: &str) -> EndpointRecord {
        EndpointRecord {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
            parameters: vec![],
            responses: vec![],
            source_url: String::new(),
        }
    }

    fn store_with_pages() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        store
            .save_page(&PageRecord {
                url: "https://docs.example.com/users".to_string(),
                title: "Users".to_string(),
                content: String::new(),
                endpoints: vec![
                    endpoint("/users", "GET", "List all users"),
                    endpoint("/users", "POST", "Create a user"),
                ],
                schemas: vec![SchemaRecord {
                    name: "User".to_string(),
                    description: String::new(),
                    properties: vec![],
                    source_url: "https://docs.example.com/users".to_string(),
                }],
                last_crawled: Utc::now(),
            })
            .unwrap();

        store
            .save_page(&PageRecord {
                url: "https://docs.example.com/orders".to_string(),
                title: "Orders".to_string(),
                content: String::new(),
                endpoints: vec![endpoint("/orders", "GET", "List user orders")],
                schemas: vec![],
                last_crawled: Utc::now(),
            })
            .unwrap();

        (dir, store)
    }

    #[test]
    fn test_search_matches_path() {
        let (_dir, store) = store_with_pages();
        let matches = search_endpoints(&store, "/orders").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].endpoint.method, "GET");
    }

    #[test]
    fn test_search_matches_description_case_insensitive() {
        let (_dir, store) = store_with_pages();
        let matches = search_endpoints(&store, "USER").unwrap();
        // "/users" twice by path, "List user orders" once by description
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_search_no_matches() {
        let (_dir, store) = store_with_pages();
        assert!(search_endpoints(&store, "webhooks").unwrap().is_empty());
    }

    #[test]
    fn test_endpoints_for_url() {
        let (_dir, store) = store_with_pages();
        let endpoints = endpoints_for_url(&store, "https://docs.example.com/users")
            .unwrap()
            .unwrap();
        assert_eq!(endpoints.len(), 2);
    }

    #[test]
    fn test_endpoints_for_unknown_url() {
        let (_dir, store) = store_with_pages();
        let result = endpoints_for_url(&store, "https://docs.example.com/missing").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_schemas_for_url() {
        let (_dir, store) = store_with_pages();
        let schemas = schemas_for_url(&store, "https://docs.example.com/users")
            .unwrap()
            .unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "User");
    }
}
