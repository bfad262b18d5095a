//! Configuration module for Wordsmith
//!
//! This module handles loading optional TOML configuration files, validating
//! the merged settings and freezing them into a [`CrawlBudget`].
//!
//! # Example
//!
//! ```no_run
//! use wordsmith::config::{load_config, CrawlBudget};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wordsmith.toml")).unwrap();
//! let budget = CrawlBudget::from_config(&config).unwrap();
//! println!("Crawler will use max depth: {}", budget.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlBudget, Credentials, DEFAULT_USER_AGENT};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{parse_seed_url, validate};
