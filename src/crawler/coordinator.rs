//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires the crawl together:
//! - Seeding the frontier with the start URL
//! - Running a fixed pool of fetch workers against the scheduler
//! - Feeding page text through the word filter into the shared word set
//! - Feeding discovered links and redirect targets back into the frontier
//! - Isolating each page in its own task, so one bad page cannot end the crawl
//! - Reporting progress and the final statistics

use crate::config::CrawlBudget;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_text;
use crate::crawler::scheduler::{CrawlTarget, Scheduler};
use crate::output::CrawlStats;
use crate::state::{DomainThrottle, PageState};
use crate::url::{host_key, normalize_parsed, same_host};
use crate::words::{WordFilter, WordSet};
use crate::WordsmithError;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// How often (in finished pages) progress is logged
const PROGRESS_INTERVAL: usize = 10;

/// The outcome of a finished crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Every unique word accepted during the crawl
    pub words: WordSet,

    /// Frontier and page counters
    pub stats: CrawlStats,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Requests an early, graceful end to a running crawl
///
/// Stopping discards the queued pages and lets in-flight fetches finish, so
/// the crawl still returns every word collected so far.
#[derive(Clone)]
pub struct StopHandle {
    scheduler: Arc<Scheduler>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.scheduler.stop();
    }
}

/// State shared by every worker of one crawl
struct WorkerContext {
    scheduler: Arc<Scheduler>,
    fetcher: Fetcher,
    filter: WordFilter,
    words: Arc<WordSet>,
    follow_external: bool,
    started: Instant,
}

/// Main crawler structure
///
/// A crawler runs a single crawl: create it from a budget, optionally take a
/// [`StopHandle`], then call [`Crawler::crawl`].
pub struct Crawler {
    budget: Arc<CrawlBudget>,
    fetcher: Fetcher,
    scheduler: Arc<Scheduler>,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `budget` - The validated limits for this crawl
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(WordsmithError)` - The HTTP client could not be built
    pub fn new(budget: CrawlBudget) -> Result<Self, WordsmithError> {
        let budget = Arc::new(budget);
        let throttle = Arc::new(DomainThrottle::new(budget.per_domain_delay));
        let fetcher = Fetcher::new(&budget, throttle.clone())?;
        let scheduler = Arc::new(Scheduler::new(budget.clone(), throttle));

        Ok(Self {
            budget,
            fetcher,
            scheduler,
        })
    }

    /// Returns a handle that can stop this crawl from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            scheduler: self.scheduler.clone(),
        }
    }

    /// Crawls from `seed` until the frontier is exhausted, the page budget is
    /// spent, or the crawl is stopped
    ///
    /// Failed pages never fail the crawl; they are logged and counted.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The collected words and statistics
    /// * `Err(WordsmithError)` - The seed is not crawlable
    pub async fn crawl(self, seed: Url) -> Result<CrawlReport, WordsmithError> {
        let seed = normalize_parsed(seed)?;
        let started = Instant::now();

        tracing::info!(
            "Starting crawl of {} (depth {}, {} workers, {:?} per-host delay)",
            seed,
            self.budget.max_depth,
            self.budget.concurrency,
            self.budget.per_domain_delay
        );

        self.scheduler.seed(seed);

        let context = Arc::new(WorkerContext {
            scheduler: self.scheduler.clone(),
            fetcher: self.fetcher.clone(),
            filter: WordFilter::new(self.budget.min_length, self.budget.max_length),
            words: Arc::new(WordSet::new()),
            follow_external: self.budget.follow_external,
            started,
        });

        let handles: Vec<_> = (0..self.budget.concurrency.max(1))
            .map(|id| {
                let context = context.clone();
                tokio::spawn(async move { run_worker(id, context).await })
            })
            .collect();

        for handle in handles {
            // The remaining workers keep draining the frontier
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        let words = Arc::clone(&context.words);
        drop(context);
        let words = Arc::try_unwrap(words).unwrap_or_else(|shared| {
            let copy = WordSet::new();
            copy.extend(shared.to_sorted_vec());
            copy
        });

        let mut stats = self.scheduler.stats();
        stats.words_accepted = words.len();
        let elapsed = started.elapsed();

        tracing::info!(
            "Crawl completed: {} pages fetched, {} failed, {} unique words in {:?}",
            stats.pages_completed,
            stats.pages_failed,
            stats.words_accepted,
            elapsed
        );

        Ok(CrawlReport {
            words,
            stats,
            elapsed,
        })
    }
}

/// Pulls targets from the scheduler until it reports the crawl finished
async fn run_worker(id: usize, context: Arc<WorkerContext>) {
    tracing::trace!("Worker {} started", id);

    while let Some(scheduled) = context.scheduler.next_target().await {
        let page = process_target(context.clone(), scheduled.target.clone());
        let state = isolate_page(&scheduled.target.url, page).await;
        let finished = context.scheduler.complete(scheduled, state);

        if finished % PROGRESS_INTERVAL == 0 {
            let elapsed = context.started.elapsed();
            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {} words, {:.2} pages/sec",
                finished,
                context.scheduler.frontier_size(),
                context.words.len(),
                finished as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
            );
        }
    }

    tracing::trace!("Worker {} finished", id);
}

/// Runs one page on its own task and turns a panic into a failed page
async fn isolate_page<F>(url: &Url, page: F) -> PageState
where
    F: Future<Output = PageState> + Send + 'static,
{
    match tokio::spawn(page).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Processing {} aborted: {}", url, e);
            PageState::Failed
        }
    }
}

/// Fetches one target and feeds its words and links back into the crawl
///
/// Links are submitted here, before the scheduler is told the page is done.
async fn process_target(context: Arc<WorkerContext>, target: CrawlTarget) -> PageState {
    tracing::debug!("Fetching {} (depth {})", target.url, target.depth);

    let mut page = match context.fetcher.fetch(&target.url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", target.url, e);
            return PageState::Failed;
        }
    };

    if let Some(location) = page.redirect.take() {
        follow_redirect(&context, &target, location);
        return PageState::Completed;
    }

    if page.has_text() {
        let text = extract_text(&page.content);
        let added = context.words.extend(context.filter.words(&text));
        tracing::debug!(
            "{}: {} new words, {} links",
            page.url,
            added,
            page.links.len()
        );
    } else {
        tracing::debug!(
            "{}: no text (status {}, content type {})",
            page.url,
            page.status,
            page.content_type.as_deref().unwrap_or("none")
        );
    }

    context
        .scheduler
        .submit_links(page.links, target.depth.saturating_add(1));

    PageState::Completed
}

/// Offers a redirect target to the frontier at the redirecting page's depth
///
/// The target is then deduplicated, budgeted and throttled like a link. A
/// seed that redirects to another host brings that host into scope.
fn follow_redirect(context: &WorkerContext, target: &CrawlTarget, location: Url) {
    if target.depth == 0 && !context.follow_external && !same_host(&target.url, &location) {
        if let Some(host) = host_key(&location) {
            tracing::info!("Seed redirected to {}, adding it to the crawl scope", host);
            context.scheduler.allow_host(&host);
        }
    }

    tracing::debug!("{} redirects to {}", target.url, location);
    let admission = context.scheduler.submit(location, target.depth);
    tracing::trace!("Redirect target admission: {:?}", admission);
}
