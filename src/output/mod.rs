//! Output module for writing the wordlist and reporting the crawl
//!
//! This module handles:
//! - Deriving a default wordlist file name from the seed URL
//! - Writing the wordlist to disk
//! - Recording and printing crawl statistics

pub mod stats;
mod wordlist;

pub use stats::{print_statistics, CrawlStats};
pub use wordlist::{default_output_path, write_wordlist};

use std::path::PathBuf;
use thiserror::Error;

/// Errors writing the wordlist
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
