//! Docscout: a polite crawler for API documentation sites
//!
//! This crate crawls an API documentation website breadth-first, extracts
//! structured endpoint and schema records from the HTML with fixed heuristics,
//! and persists one JSON document per page for later lookup.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod query;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for docscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid base URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for docscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlSummary, Crawler};
pub use storage::{JsonStore, Storage};
