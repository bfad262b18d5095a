use crate::config::validation::validate;
use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Default user agent, a desktop Chrome build so pages render their usual text
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.113 Safari/537.36";

/// Main configuration structure for Wordsmith
///
/// Every field has a default so a TOML file only needs the keys it changes.
/// Command-line flags are layered on top of this by the binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Seed URL to start crawling from
    pub url: Option<String>,

    /// Wordlist destination; derived from the seed host when absent
    pub output: Option<String>,

    /// Maximum number of link hops from the seed
    pub depth: u32,

    /// Maximum number of pages to fetch (unlimited when absent)
    pub max_pages: Option<u32>,

    /// Number of concurrent fetch workers
    pub threads: u32,

    /// Words must be strictly longer than this
    pub min_length: usize,

    /// Words must be strictly shorter than this
    pub max_length: usize,

    /// Minimum time between requests to the same host (milliseconds)
    pub delay: u64,

    /// Per-request timeout (seconds)
    pub timeout: u64,

    /// Additional attempts after a failed fetch
    pub retries: u32,

    /// Basic auth username
    pub user: Option<String>,

    /// Basic auth password
    pub pass: Option<String>,

    /// User-Agent header value
    pub user_agent: String,

    /// Follow links that leave the seed's host
    pub follow_external: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            output: None,
            depth: 3,
            max_pages: None,
            threads: 10,
            min_length: 3,
            max_length: 256,
            delay: 100,
            timeout: 15,
            retries: 1,
            user: None,
            pass: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_external: false,
        }
    }
}

/// Basic auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Immutable snapshot of the limits a crawl runs under
///
/// Built once from a validated [`Config`] and shared read-only by every
/// component for the lifetime of the crawl.
#[derive(Debug, Clone)]
pub struct CrawlBudget {
    pub max_depth: u32,
    pub max_pages: Option<usize>,
    pub concurrency: usize,
    pub per_domain_delay: Duration,
    pub request_timeout: Duration,
    pub retry_count: u32,
    pub min_length: usize,
    pub max_length: usize,
    pub credentials: Option<Credentials>,
    pub user_agent: String,
    pub follow_external: bool,
}

impl CrawlBudget {
    /// Validates a configuration and freezes it into a budget
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlBudget)` - The configuration is usable
    /// * `Err(ConfigError)` - A validation rule failed (including partial credentials)
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate(config)?;

        let credentials = match (non_empty(&config.user), non_empty(&config.pass)) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            max_depth: config.depth,
            max_pages: config.max_pages.map(|pages| pages as usize),
            concurrency: config.threads as usize,
            per_domain_delay: Duration::from_millis(config.delay),
            request_timeout: Duration::from_secs(config.timeout),
            retry_count: config.retries,
            min_length: config.min_length,
            max_length: config.max_length,
            credentials,
            user_agent: config.user_agent.clone(),
            follow_external: config.follow_external,
        })
    }

    /// Returns true once `fetched` pages have used up the page budget
    pub fn pages_exhausted(&self, fetched: usize) -> bool {
        self.max_pages.is_some_and(|max| fetched >= max)
    }
}

/// Treats empty strings the same as absent values
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
