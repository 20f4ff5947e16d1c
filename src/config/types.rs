use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for docscout
///
/// Every field has a default, so a missing config file or a partial one is
/// usable as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Minimum time between requests to the same domain (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Maximum number of pages to visit per crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version of the crawler
    #[serde(default = "default_agent_version")]
    pub version: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for stored page documents
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,
}

impl Config {
    /// The user-agent string sent on every request
    pub fn user_agent_string(&self) -> String {
        format!("{}/{}", self.user_agent.name, self.user_agent.version)
    }

    /// Per-domain politeness delay as a [`Duration`]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.crawler.delay_ms)
    }

    /// Per-request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            delay_ms: default_delay_ms(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_concurrency() -> u32 {
    5
}

fn default_delay_ms() -> u64 {
    500
}

fn default_max_pages() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_agent_name() -> String {
    "docscout".to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.concurrency, 5);
        assert_eq!(config.crawler.delay_ms, 500);
        assert_eq!(config.crawler.max_pages, 500);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.output.data_dir, "./data");
    }

    #[test]
    fn test_user_agent_string() {
        let mut config = Config::default();
        config.user_agent.name = "scout".to_string();
        config.user_agent.version = "2.0".to_string();
        assert_eq!(config.user_agent_string(), "scout/2.0");
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.delay(), Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
