//! Crawl coordination
//!
//! Owns the shared pieces of a crawl (HTTP client, frontier, limiter,
//! semaphore, storage handle) and runs the worker pool. The crawl ends when
//! the frontier drains or the page cap is reached; individual page failures
//! are logged and never abort the crawl.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::limiter::RateLimiter;
use crate::extract::{extract, MatcherSet};
use crate::storage::{PageRecord, SiteInfo, Storage};
use crate::url::domain_key;
use crate::{Result, ScoutError};
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Page cap applied when the caller does not pass one
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Site title recorded when the base page yields none
const FALLBACK_SITE_TITLE: &str = "Unknown API Documentation";

/// Counters reported after a crawl finishes
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Number of distinct URLs visited (fetched or skipped)
    pub pages_visited: usize,
}

/// The crawl orchestrator
///
/// One `Crawler` can run multiple crawls; each `crawl` call gets its own
/// frontier and rate limiter while the HTTP client and storage are shared.
pub struct Crawler {
    storage: Arc<dyn Storage>,
    client: Client,
    matchers: Arc<MatcherSet>,
    concurrency: usize,
    delay: Duration,
    default_max_pages: usize,
}

/// Everything a worker task needs, shared behind one `Arc`
struct WorkerCtx {
    storage: Arc<dyn Storage>,
    client: Client,
    matchers: Arc<MatcherSet>,
    frontier: Frontier,
    limiter: RateLimiter,
    semaphore: Semaphore,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent_string(), config.timeout())?;

        Ok(Self {
            storage,
            client,
            matchers: Arc::new(MatcherSet::default()),
            concurrency: config.crawler.concurrency as usize,
            delay: config.delay(),
            default_max_pages: config.crawler.max_pages as usize,
        })
    }

    /// Crawls a documentation site starting at `base_url`
    ///
    /// Visits same-host pages breadth-first up to `max_pages` (the configured
    /// cap when `None`), extracting and storing one document per page. An
    /// unparseable base URL is the only fatal input error.
    pub async fn crawl(&self, base_url: &str, max_pages: Option<usize>) -> Result<CrawlSummary> {
        let base = parse_base_url(base_url)?;
        let max_pages = max_pages.unwrap_or(self.default_max_pages);

        tracing::info!(%base, max_pages, concurrency = self.concurrency, "starting crawl");
        let start_time = std::time::Instant::now();

        let ctx = Arc::new(WorkerCtx {
            storage: Arc::clone(&self.storage),
            client: self.client.clone(),
            matchers: Arc::clone(&self.matchers),
            frontier: Frontier::new(max_pages),
            limiter: RateLimiter::new(self.delay),
            semaphore: Semaphore::new(self.concurrency),
        });

        let site_title = fetch_site_title(&ctx, &base).await;
        self.storage.save_site_info(&SiteInfo {
            base_url: base.to_string(),
            title: site_title,
            last_crawled: Utc::now(),
        })?;

        ctx.frontier.seed(&base);

        let mut workers = JoinSet::new();
        for worker_id in 0..self.concurrency {
            let ctx = Arc::clone(&ctx);
            workers.spawn(async move { worker_loop(worker_id, ctx).await });
        }
        while let Some(joined) = workers.join_next().await {
            joined?;
        }

        let summary = CrawlSummary {
            pages_visited: ctx.frontier.visited_count(),
        };
        tracing::info!(
            pages_visited = summary.pages_visited,
            elapsed = ?start_time.elapsed(),
            "crawl complete"
        );

        Ok(summary)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let base = Url::parse(base_url).map_err(|e| ScoutError::InvalidUrl {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;

    if base.host_str().is_none() {
        return Err(ScoutError::InvalidUrl {
            url: base_url.to_string(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(base)
}

/// Fetches the base page once to name the site
///
/// Goes through the limiter so the seed fetch counts toward the domain's
/// politeness window. Any failure falls back to a placeholder title.
async fn fetch_site_title(ctx: &WorkerCtx, base: &Url) -> String {
    ctx.limiter.wait_turn(&domain_key(base)).await;

    let title = match fetch_url(&ctx.client, base).await {
        FetchOutcome::Html(body) => extract(&body, base, &ctx.matchers).title,
        FetchOutcome::Skipped(reason) => {
            tracing::warn!(url = %base, %reason, "could not fetch base page for site title");
            String::new()
        }
    };

    if title.is_empty() {
        FALLBACK_SITE_TITLE.to_string()
    } else {
        title
    }
}

/// One worker: claim, mark visited, process, repeat until the frontier drains
async fn worker_loop(worker_id: usize, ctx: Arc<WorkerCtx>) {
    while let Some(claimed) = ctx.frontier.next().await {
        let url = claimed.url().clone();

        // A duplicate can slip past the push-side check when two pages link
        // to the same URL concurrently; the mark is the authoritative gate.
        if !ctx.frontier.mark_visited(&url) {
            continue;
        }

        tracing::debug!(worker_id, %url, "processing page");
        if let Err(e) = process_url(&ctx, &url).await {
            tracing::error!(worker_id, %url, error = %e, "failed to process page");
        }
    }
    tracing::debug!(worker_id, "frontier drained, worker exiting");
}

/// Fetches, extracts, and stores a single page, then enqueues its links
async fn process_url(ctx: &WorkerCtx, url: &Url) -> Result<()> {
    ctx.limiter.wait_turn(&domain_key(url)).await;
    let _permit = ctx.semaphore.acquire().await.ok();

    let html = match fetch_url(&ctx.client, url).await {
        FetchOutcome::Html(body) => body,
        FetchOutcome::Skipped(reason) => {
            tracing::warn!(%url, %reason, "skipping page");
            return Ok(());
        }
    };

    let extraction = extract(&html, url, &ctx.matchers);
    tracing::debug!(
        %url,
        endpoints = extraction.endpoints.len(),
        schemas = extraction.schemas.len(),
        links = extraction.links.len(),
        "extracted page"
    );

    ctx.storage.save_page(&PageRecord {
        url: url.to_string(),
        title: extraction.title,
        content: html,
        endpoints: extraction.endpoints,
        schemas: extraction.schemas,
        last_crawled: Utc::now(),
    })?;

    for link in &extraction.links {
        ctx.frontier.push(link);
    }

    Ok(())
}
