//! Configuration module for docscout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have defaults, so running without a config file works.
//!
//! # Example
//!
//! ```no_run
//! use docscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
