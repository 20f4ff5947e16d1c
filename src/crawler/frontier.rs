//! Crawl frontier: pending queue, visited set, and the page cap
//!
//! All shared crawl state lives here behind one lock. Workers interact with
//! it only through the atomic operations below, so a URL discovered from two
//! pages at once is still fetched exactly once.

use crate::url::{strip_fragment, visited_key};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

struct FrontierState {
    /// FIFO queue of URLs waiting to be claimed
    queue: VecDeque<Url>,

    /// Keys currently sitting in the queue, to suppress duplicate enqueues
    queued: HashSet<String>,

    /// Keys of URLs already claimed by a worker
    visited: HashSet<String>,

    /// Number of claimed URLs whose workers have not finished yet
    in_flight: usize,
}

/// The crawl's pending-and-visited URL tracking structure
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
    max_pages: usize,
}

/// A URL claimed from the frontier
///
/// Holds the claim's in-flight slot; dropping it (normally at the end of a
/// worker iteration) releases the slot, which is what lets the frontier
/// detect the drained condition: queue empty and nothing in flight.
pub struct ClaimedUrl<'a> {
    url: Url,
    frontier: &'a Frontier,
}

impl ClaimedUrl<'_> {
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Drop for ClaimedUrl<'_> {
    fn drop(&mut self) {
        self.frontier.release();
    }
}

impl Frontier {
    /// Creates an empty frontier capped at `max_pages` visited URLs
    pub fn new(max_pages: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                queued: HashSet::new(),
                visited: HashSet::new(),
                in_flight: 0,
            }),
            notify: Notify::new(),
            max_pages,
        }
    }

    /// Enqueues the starting URL
    pub fn seed(&self, url: &Url) {
        self.push(url);
    }

    /// Enqueues a discovered URL
    ///
    /// No-op when the URL was already visited, is already queued, or the page
    /// cap has been reached. Fragment-only variants collapse onto one key.
    pub fn push(&self, url: &Url) {
        let key = visited_key(url);
        {
            let mut state = self.state.lock().unwrap();
            if state.visited.len() >= self.max_pages
                || state.visited.contains(&key)
                || state.queued.contains(&key)
            {
                return;
            }
            state.queue.push_back(strip_fragment(url));
            state.queued.insert(key);
        }
        self.notify.notify_one();
    }

    /// Claims the next URL, waiting until one is available or the crawl drains
    ///
    /// Returns `None` only when the queue is empty AND no worker holds an
    /// in-flight claim; that is the drained condition that ends the crawl.
    pub async fn next(&self) -> Option<ClaimedUrl<'_>> {
        loop {
            // Register for wakeups before checking state, so a push landing
            // between the check and the await is not lost.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.state.lock().unwrap();
                if let Some(url) = state.queue.pop_front() {
                    state.queued.remove(&visited_key(&url));
                    state.in_flight += 1;
                    return Some(ClaimedUrl {
                        url,
                        frontier: self,
                    });
                }
                if state.in_flight == 0 {
                    // Wake any other idle workers so they exit too
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Atomically checks and marks a URL as visited
    ///
    /// Returns true only when the URL was newly marked and the cap was not
    /// yet reached. Workers discard the claim when this returns false; the
    /// re-check matters because concurrent workers may enqueue duplicates
    /// between a push-side check and this mark.
    pub fn mark_visited(&self, url: &Url) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.visited.len() >= self.max_pages {
            return false;
        }
        state.visited.insert(visited_key(url))
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct URLs marked visited so far
    pub fn visited_count(&self) -> usize {
        self.state.lock().unwrap().visited.len()
    }

    fn release(&self) {
        let drained = {
            let mut state = self.state.lock().unwrap();
            state.in_flight -= 1;
            state.in_flight == 0 && state.queue.is_empty()
        };
        if drained {
            self.notify.notify_waiters();
        }
    }
}
