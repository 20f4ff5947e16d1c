//! Storage trait and error types
//!
//! The crawler only talks to storage through this trait, so the on-disk
//! format can be swapped without touching the crawl loop.

use crate::storage::{PageRecord, SiteInfo};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage location is not writable: {0}")]
    NotWritable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Pages are keyed by their fragment-stripped URL; saving a page for an
/// already-stored URL overwrites it (last write wins).
pub trait Storage: Send + Sync {
    /// Saves the site-level record, replacing any previous one
    fn save_site_info(&self, info: &SiteInfo) -> StorageResult<()>;

    /// Gets the site-level record, if a crawl has been run
    fn get_site_info(&self) -> StorageResult<Option<SiteInfo>>;

    /// Saves a page document keyed by its URL
    fn save_page(&self, page: &PageRecord) -> StorageResult<()>;

    /// Gets a page document by URL
    fn get_page(&self, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Lists the URLs of all stored pages
    fn list_page_urls(&self) -> StorageResult<Vec<String>>;

    /// Generates a unique identifier for derived records
    fn generate_id(&self) -> String;
}
