//! Crawl statistics
//!
//! Counters collected by the scheduler while the crawl runs, and a printer
//! for the end-of-run summary.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched successfully (including pages without text)
    pub pages_completed: usize,

    /// Pages that failed after every retry
    pub pages_failed: usize,

    /// Links offered to the frontier, including the seed
    pub links_discovered: usize,

    /// Links accepted into the frontier
    pub links_queued: usize,

    /// Links dropped because they were already seen
    pub discarded_visited: usize,

    /// Links dropped for exceeding the maximum depth
    pub discarded_depth: usize,

    /// Links dropped for pointing outside the crawl scope
    pub discarded_scope: usize,

    /// Links dropped because the page budget was spent or the crawl stopped
    pub discarded_budget: usize,

    /// Links that were not fetchable http(s) URLs
    pub discarded_invalid: usize,

    /// Queued targets dropped when the crawl ended early
    pub targets_abandoned: usize,

    /// Unique words in the final wordlist
    pub words_accepted: usize,
}

impl CrawlStats {
    /// Pages that reached a terminal state
    pub fn pages_finished(&self) -> usize {
        self.pages_completed + self.pages_failed
    }

    /// Links dropped at discovery for any reason
    pub fn links_discarded(&self) -> usize {
        self.discarded_visited
            + self.discarded_depth
            + self.discarded_scope
            + self.discarded_budget
            + self.discarded_invalid
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `elapsed` - How long the crawl ran
pub fn print_statistics(stats: &CrawlStats, elapsed: Duration) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_completed);
    println!("  Failed: {}", stats.pages_failed);
    if stats.targets_abandoned > 0 {
        println!("  Abandoned in queue: {}", stats.targets_abandoned);
    }
    println!();

    println!("Links:");
    println!("  Discovered: {}", stats.links_discovered);
    println!("  Queued: {}", stats.links_queued);
    println!("  Discarded: {}", stats.links_discarded());
    println!("    Already visited: {}", stats.discarded_visited);
    println!("    Too deep: {}", stats.discarded_depth);
    println!("    Out of scope: {}", stats.discarded_scope);
    println!("    Over budget: {}", stats.discarded_budget);
    println!("    Invalid: {}", stats.discarded_invalid);
    println!();

    println!("Words: {}", stats.words_accepted);
    println!("Execution time: {:.2} seconds", elapsed.as_secs_f64());
}
