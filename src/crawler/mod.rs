//! Crawler module: fetching, scheduling, and crawl coordination
//!
//! The pieces fit together as a small pipeline:
//! - [`Frontier`] holds the pending queue and visited set
//! - [`RateLimiter`] spaces requests per domain
//! - the fetcher turns URLs into HTML bodies (or skips)
//! - [`Crawler`] wires them into a bounded worker pool

mod coordinator;
mod fetcher;
mod frontier;
mod limiter;

pub use coordinator::{CrawlSummary, Crawler, DEFAULT_MAX_PAGES};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, SkipReason};
pub use frontier::{ClaimedUrl, Frontier};
pub use limiter::RateLimiter;
