//! Wordsmith: a polite wordlist builder
//!
//! This crate crawls a website from a seed URL, extracts the visible text of
//! every page it reaches and accumulates the unique words into a wordlist
//! suitable for content discovery and brute-forcing.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;
pub mod words;

use thiserror::Error;

/// Main error type for Wordsmith operations
#[derive(Debug, Error)]
pub enum WordsmithError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No seed URL given (use --url or set `url` in the config file)")]
    MissingSeed,

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(#[from] UrlError),

    #[error("Please specify both a username and a password if using basic auth")]
    PartialCredentials,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

// Re-export commonly used types
pub use config::{Config, CrawlBudget, Credentials};
pub use crawler::{CrawlReport, Crawler, StopHandle};
pub use state::{DomainState, PageState};
pub use crate::url::{host_key, normalize_url};
pub use words::{WordFilter, WordSet};
