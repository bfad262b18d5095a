//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing for visible text and links
//! - Frontier scheduling and per-host rate limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlReport, Crawler, StopHandle};
pub use fetcher::{build_http_client, FetchError, Fetcher, PageResult};
pub use parser::{extract_links, extract_text};
pub use scheduler::{Admission, CrawlTarget, ScheduledFetch, Scheduler};

use crate::config::CrawlBudget;
use crate::WordsmithError;
use url::Url;

/// Runs a complete crawl from `seed`
///
/// This is the main entry point for a crawl without a stop handle. It will:
/// 1. Build the HTTP client and scheduler
/// 2. Seed the frontier
/// 3. Fetch pages and follow links within the budget
/// 4. Collect every accepted word
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl finished (including budget exhaustion)
/// * `Err(WordsmithError)` - The crawl could not start
pub async fn crawl(budget: CrawlBudget, seed: Url) -> Result<CrawlReport, WordsmithError> {
    Crawler::new(budget)?.crawl(seed).await
}
