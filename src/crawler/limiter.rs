//! Per-domain politeness limiter
//!
//! Spaces consecutive requests to the same domain by a minimum delay. The
//! read-modify-write on a domain's last-access time happens under one lock,
//! so two workers can never reserve the same slot; the sleep itself happens
//! outside the lock, so domains never serialize against each other.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Enforces the minimum delay between requests to one domain
pub struct RateLimiter {
    delay: Duration,
    last_access: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_access: Mutex::new(HashMap::new()),
        }
    }

    /// Blocks the calling worker until the domain's slot is free, then
    /// records "now" as the domain's last access before returning
    ///
    /// Multiple callers racing on one domain each reserve a distinct slot at
    /// least `delay` apart; a loser of the race just sleeps again.
    pub async fn wait_turn(&self, domain: &str) {
        loop {
            let wait = {
                let mut last_access = self.last_access.lock().await;
                let now = Instant::now();
                match last_access.get(domain) {
                    Some(&prev) if now.duration_since(prev) < self.delay => {
                        Some(self.delay - now.duration_since(prev))
                    }
                    _ => {
                        last_access.insert(domain.to_string(), now);
                        None
                    }
                }
            };

            match wait {
                None => return,
                Some(remaining) => sleep(remaining).await,
            }
        }
    }

    /// The domain's recorded last-access time, if any
    pub async fn last_access(&self, domain: &str) -> Option<Instant> {
        self.last_access.lock().await.get(domain).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_first_request_passes_immediately() {
        let limiter = RateLimiter::new(DELAY);
        let start = Instant::now();
        limiter.wait_turn("https://a.example").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_domain_spaced_by_delay() {
        let limiter = RateLimiter::new(DELAY);

        limiter.wait_turn("https://a.example").await;
        let first = limiter.last_access("https://a.example").await.unwrap();

        limiter.wait_turn("https://a.example").await;
        let second = limiter.last_access("https://a.example").await.unwrap();

        assert!(second.duration_since(first) >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_same_domain_all_spaced() {
        let limiter = Arc::new(RateLimiter::new(DELAY));
        let start = Instant::now();

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let limiter = Arc::clone(&limiter);
            tasks.push(tokio::spawn(async move {
                limiter.wait_turn("https://a.example").await;
                Instant::now()
            }));
        }

        let mut times = Vec::new();
        for task in tasks {
            times.push(task.await.unwrap());
        }
        times.sort();

        // Three reservations span at least two full delays
        assert!(times[2].duration_since(start) >= DELAY * 2);
        assert!(times[1].duration_since(times[0]) >= DELAY);
        assert!(times[2].duration_since(times[1]) >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_domains_not_serialized() {
        let limiter = RateLimiter::new(DELAY);
        let start = Instant::now();

        limiter.wait_turn("https://a.example").await;
        limiter.wait_turn("https://b.example").await;
        limiter.wait_turn("https://c.example").await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_delay_passes_without_wait() {
        let limiter = RateLimiter::new(DELAY);

        limiter.wait_turn("https://a.example").await;
        tokio::time::advance(DELAY).await;

        let before = Instant::now();
        limiter.wait_turn("https://a.example").await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
