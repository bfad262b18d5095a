//! Scheduler for managing the crawl frontier and politeness
//!
//! This module handles:
//! - The page state of every URL seen, so each URL is fetched at most once
//! - Depth, scope and page-budget checks on discovered links
//! - Global concurrency limiting via a semaphore
//! - Per-host minimum delays between fetch starts
//! - Detecting when the crawl is finished

use crate::config::CrawlBudget;
use crate::output::CrawlStats;
use crate::state::{DomainThrottle, PageState};
use crate::url::{host_key, normalize_parsed};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::{Notify, OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Sleep used when every queued host is waiting but no wait could be computed
const FALLBACK_WAIT: Duration = Duration::from_millis(10);

/// A URL accepted into the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// The normalized URL to fetch
    pub url: Url,

    /// Link hops from the seed
    pub depth: u32,

    /// Politeness key of the URL's host
    pub host: String,
}

/// A target released to a worker, holding one concurrency slot
#[derive(Debug)]
pub struct ScheduledFetch {
    /// The target to fetch
    pub target: CrawlTarget,

    /// The semaphore permit for this fetch
    _permit: OwnedSemaphorePermit,
}

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL was queued
    Queued,
    /// The URL was already queued or fetched
    AlreadyVisited,
    /// The URL is deeper than the maximum depth
    TooDeep,
    /// The URL is on a host outside the crawl scope
    OutOfScope,
    /// The page budget is used up
    BudgetExhausted,
    /// The crawl was stopped
    Stopped,
    /// The URL is not a fetchable http(s) URL
    Invalid,
}

/// What a worker should do next
#[derive(Debug)]
enum Readiness {
    /// A target was reserved for the caller
    Ready(CrawlTarget),
    /// Every queued host is cooling down; the soonest frees up after this long
    Wait(Duration),
    /// Nothing queued, but in-flight pages may still submit links
    Idle,
    /// No further targets will ever be released
    Finished,
}

/// Mutable frontier bookkeeping, guarded by one lock
#[derive(Debug, Default)]
struct Frontier {
    queue: VecDeque<CrawlTarget>,
    /// Every URL ever queued, keyed by its normalized form
    pages: HashMap<String, PageState>,
    scope: HashSet<String>,
    in_flight: usize,
    stopped: bool,
    stats: CrawlStats,
}

impl Frontier {
    /// Pages counted against the budget: finished plus in flight
    fn started(&self) -> usize {
        self.stats.pages_completed + self.stats.pages_failed + self.in_flight
    }

    /// Moves a URL along its lifecycle, entering it as Discovered if unseen
    fn set_state(&mut self, url: &Url, next: PageState) {
        let state = self
            .pages
            .entry(url.as_str().to_string())
            .or_insert(PageState::Discovered);
        debug_assert!(
            state.can_transition_to(next),
            "{}: illegal transition {} -> {}",
            url,
            state,
            next
        );
        tracing::trace!("{} {} -> {}", url, state, next);
        *state = next;
    }

    /// Drops every queued target; they will never be fetched
    fn abandon_queue(&mut self) {
        self.stats.targets_abandoned += self.queue.len();
        self.queue.clear();
    }
}

/// Scheduler owns the frontier and decides which target is released next
///
/// The scheduler coordinates:
/// - Global concurrency limits (one permit per in-flight fetch)
/// - The page budget (completed plus in-flight fetches)
/// - Per-host delays, via the shared [`DomainThrottle`]
/// - FIFO fairness: the oldest target whose host is ready is released first
pub struct Scheduler {
    budget: Arc<CrawlBudget>,

    /// Global semaphore for limiting concurrent fetches
    semaphore: Arc<Semaphore>,

    /// Per-host politeness state shared with the fetcher
    throttle: Arc<DomainThrottle>,

    frontier: Mutex<Frontier>,

    /// Wakes waiting workers when targets arrive or fetches finish
    changed: Notify,
}

impl Scheduler {
    /// Creates a new scheduler with an empty frontier
    pub fn new(budget: Arc<CrawlBudget>, throttle: Arc<DomainThrottle>) -> Self {
        let semaphore = Arc::new(Semaphore::new(budget.concurrency.max(1)));

        Self {
            budget,
            semaphore,
            throttle,
            frontier: Mutex::new(Frontier::default()),
            changed: Notify::new(),
        }
    }

    /// Queues the seed URL at depth 0 and adds its host to the crawl scope
    pub fn seed(&self, url: Url) -> Admission {
        if let Some(host) = host_key(&url) {
            self.allow_host(&host);
        }
        self.submit(url, 0)
    }

    /// Adds a host to the crawl scope
    ///
    /// Used when the seed redirects to a different host (e.g. `www.`), so the
    /// rest of the site is still considered internal.
    pub fn allow_host(&self, host: &str) {
        self.lock().scope.insert(host.to_string());
    }

    /// Offers a discovered URL to the frontier
    ///
    /// The URL is queued only if it is within depth, in scope, not yet
    /// visited, and the page budget is not already spent. Anything else is
    /// discarded for good.
    pub fn submit(&self, url: Url, depth: u32) -> Admission {
        let admission = self.admit(url, depth);
        if admission == Admission::Queued {
            self.changed.notify_waiters();
        }
        admission
    }

    /// Offers every link found on a page, each at `depth`
    ///
    /// # Returns
    ///
    /// The number of links that were queued
    pub fn submit_links(&self, links: Vec<Url>, depth: u32) -> usize {
        let queued = links
            .into_iter()
            .map(|link| self.admit(link, depth))
            .filter(|admission| *admission == Admission::Queued)
            .count();

        if queued > 0 {
            self.changed.notify_waiters();
        }
        queued
    }

    fn admit(&self, url: Url, depth: u32) -> Admission {
        let mut frontier = self.lock();
        frontier.stats.links_discovered += 1;

        let admission = self.check_admission(&mut frontier, url, depth);
        match admission {
            Admission::Queued => frontier.stats.links_queued += 1,
            Admission::AlreadyVisited => frontier.stats.discarded_visited += 1,
            Admission::TooDeep => frontier.stats.discarded_depth += 1,
            Admission::OutOfScope => frontier.stats.discarded_scope += 1,
            Admission::BudgetExhausted | Admission::Stopped => {
                frontier.stats.discarded_budget += 1
            }
            Admission::Invalid => frontier.stats.discarded_invalid += 1,
        }
        admission
    }

    fn check_admission(&self, frontier: &mut Frontier, url: Url, depth: u32) -> Admission {
        if frontier.stopped {
            return Admission::Stopped;
        }

        if depth > self.budget.max_depth {
            return Admission::TooDeep;
        }

        let Ok(url) = normalize_parsed(url) else {
            return Admission::Invalid;
        };
        let Some(host) = host_key(&url) else {
            return Admission::Invalid;
        };

        if !self.budget.follow_external && !frontier.scope.contains(&host) {
            return Admission::OutOfScope;
        }

        if frontier.pages.contains_key(url.as_str()) {
            return Admission::AlreadyVisited;
        }

        if self.budget.pages_exhausted(frontier.started()) {
            return Admission::BudgetExhausted;
        }

        tracing::trace!("Queued {} at depth {}", url, depth);
        frontier.set_state(&url, PageState::Queued);
        frontier.queue.push_back(CrawlTarget { url, depth, host });
        Admission::Queued
    }

    /// Gets the next target to fetch
    ///
    /// This method:
    /// 1. Acquires a global semaphore permit
    /// 2. Returns None if the crawl is finished (frontier exhausted, page
    ///    budget spent, or stopped)
    /// 3. Releases the oldest queued target whose host is past its delay,
    ///    recording the fetch start for that host
    /// 4. Otherwise sleeps until the soonest host is ready or the frontier
    ///    changes, and tries again
    ///
    /// # Returns
    ///
    /// * `Some(ScheduledFetch)` - A target that's ready to fetch
    /// * `None` - No more targets will be released
    pub async fn next_target(&self) -> Option<ScheduledFetch> {
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;

        loop {
            // Registered before polling so a wake-up in between is not lost
            let changed = self.changed.notified();

            match self.poll_ready(Instant::now()) {
                Readiness::Ready(target) => {
                    tracing::debug!("Releasing {} (depth {})", target.url, target.depth);
                    return Some(ScheduledFetch {
                        target,
                        _permit: permit,
                    });
                }
                Readiness::Finished => {
                    self.changed.notify_waiters();
                    return None;
                }
                Readiness::Idle => {
                    tracing::trace!("Frontier empty, waiting for in-flight pages");
                    changed.await;
                }
                Readiness::Wait(wait) => {
                    tracing::trace!("No host ready, waiting {:?}", wait);
                    tokio::select! {
                        _ = changed => {}
                        _ = tokio::time::sleep(wait) => {}
                    }
                }
            }
        }
    }

    fn poll_ready(&self, now: Instant) -> Readiness {
        let mut frontier = self.lock();

        if frontier.stopped || self.budget.pages_exhausted(frontier.started()) {
            frontier.abandon_queue();
            return Readiness::Finished;
        }

        if frontier.queue.is_empty() {
            return if frontier.in_flight == 0 {
                Readiness::Finished
            } else {
                Readiness::Idle
            };
        }

        let mut blocked: HashSet<&str> = HashSet::new();
        let mut soonest: Option<Duration> = None;
        let mut ready_index = None;

        for (index, target) in frontier.queue.iter().enumerate() {
            if blocked.contains(target.host.as_str()) {
                continue;
            }
            match self.throttle.try_reserve(&target.host, now) {
                Ok(()) => {
                    ready_index = Some(index);
                    break;
                }
                Err(wait) => {
                    blocked.insert(target.host.as_str());
                    soonest = Some(soonest.map_or(wait, |s| s.min(wait)));
                }
            }
        }

        match ready_index.and_then(|index| frontier.queue.remove(index)) {
            Some(target) => {
                frontier.in_flight += 1;
                frontier.set_state(&target.url, PageState::InFlight);
                Readiness::Ready(target)
            }
            None => Readiness::Wait(soonest.unwrap_or(FALLBACK_WAIT)),
        }
    }

    /// Marks a released target as finished
    ///
    /// Links found on the page must be submitted before calling this, so the
    /// frontier never looks exhausted while they are pending.
    ///
    /// # Returns
    ///
    /// The number of pages finished so far
    pub fn complete(&self, fetch: ScheduledFetch, state: PageState) -> usize {
        let finished = {
            let mut frontier = self.lock();
            frontier.set_state(&fetch.target.url, state);
            frontier.in_flight = frontier.in_flight.saturating_sub(1);
            match state {
                PageState::Failed => frontier.stats.pages_failed += 1,
                _ => frontier.stats.pages_completed += 1,
            }
            frontier.stats.pages_completed + frontier.stats.pages_failed
        };

        drop(fetch);
        self.changed.notify_waiters();
        finished
    }

    /// Stops releasing targets; queued targets are discarded and in-flight
    /// fetches are left to finish
    pub fn stop(&self) {
        {
            let mut frontier = self.lock();
            if !frontier.stopped {
                tracing::info!("Stopping crawl, {} queued pages abandoned", frontier.queue.len());
            }
            frontier.stopped = true;
            frontier.abandon_queue();
        }
        self.changed.notify_waiters();
    }

    /// Returns the number of targets waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.lock().queue.len()
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    #[cfg(test)]
    fn page_state(&self, url: &Url) -> Option<PageState> {
        self.lock().pages.get(url.as_str()).copied()
    }

    /// Snapshot of the frontier counters
    pub fn stats(&self) -> CrawlStats {
        self.lock().stats.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Frontier> {
        self.frontier.lock().unwrap_or_else(|e| e.into_inner())
    }
}
