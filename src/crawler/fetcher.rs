//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Attaching basic auth credentials
//! - Retrying failed attempts through the per-host politeness throttle
//! - Reporting redirects instead of following them
//! - Error classification

use crate::config::{CrawlBudget, Credentials};
use crate::crawler::parser::extract_links;
use crate::state::DomainThrottle;
use crate::url::{host_key, normalize_parsed};
use reqwest::{header, redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that end a page fetch
///
/// None of these are fatal to the crawl: the page is marked failed and the
/// crawl moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Http { url, source: error }
        }
    }
}

/// A fetched page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The URL that was requested
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Decoded response body
    pub content: String,

    /// Outbound links, resolved against `url` and unique within the page
    pub links: Vec<Url>,

    /// Normalized `Location` of a 3xx response
    pub redirect: Option<Url>,
}

impl PageResult {
    /// Returns true if the body should be mined for words and links
    ///
    /// Only 2xx responses whose Content-Type is missing or textual qualify.
    pub fn has_text(&self) -> bool {
        (200..300).contains(&self.status) && self.content_type.as_deref().map_or(true, is_textual)
    }
}

/// Returns true for HTML, XML and plain text media types
fn is_textual(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type.starts_with("text/") || media_type.contains("html") || media_type.contains("xml")
}

/// Builds an HTTP client from the crawl budget
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(FetchError::Client)` - Failed to build client
pub fn build_http_client(budget: &CrawlBudget) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(budget.user_agent.as_str())
        .timeout(budget.request_timeout)
        .connect_timeout(budget.request_timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(FetchError::Client)
}

/// Performs page fetches for the crawl workers
///
/// Redirects are not followed here. A 3xx response comes back with its
/// `Location` in [`PageResult::redirect`] so the target goes through the
/// frontier like any other link, and is fetched at most once and under the
/// per-host delay.
///
/// The caller is expected to have reserved the host in the shared
/// [`DomainThrottle`] before calling [`Fetcher::fetch`]; every retry reserves
/// the host again, so retries honor the same per-host delay as first attempts.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry_count: u32,
    credentials: Option<Credentials>,
    throttle: Arc<DomainThrottle>,
}

impl Fetcher {
    pub fn new(budget: &CrawlBudget, throttle: Arc<DomainThrottle>) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(budget)?,
            retry_count: budget.retry_count,
            credentials: budget.credentials.clone(),
            throttle,
        })
    }

    /// Fetches a URL, retrying up to the configured retry count
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx | Success |
    /// | 3xx | Success, with `redirect` set when `Location` is usable |
    /// | 4xx / 5xx | Retry, then `FetchError::Status` |
    /// | Timeout | Retry, then `FetchError::Timeout` |
    /// | Connection failure | Retry, then `FetchError::Connect` |
    /// | Other transport error | Retry, then `FetchError::Http` |
    ///
    /// # Returns
    ///
    /// * `Ok(PageResult)` - The page, with its outbound links
    /// * `Err(FetchError)` - The last attempt's error once retries are exhausted
    pub async fn fetch(&self, url: &Url) -> Result<PageResult, FetchError> {
        let mut attempt = 0;

        loop {
            let error = match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(error) => error,
            };

            if attempt >= self.retry_count {
                return Err(error);
            }
            attempt += 1;

            tracing::debug!(
                "Attempt {} for {} failed ({}), retrying",
                attempt,
                url,
                error
            );

            if let Some(host) = host_key(url) {
                self.throttle.reserve(&host).await;
            }
        }
    }

    /// Sends a single GET request
    async fn fetch_once(&self, url: &Url) -> Result<PageResult, FetchError> {
        let mut request = self.client.get(url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let redirect = if status.is_redirection() {
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|location| resolve_location(url, location))
        } else {
            None
        };

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let content = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let mut page = PageResult {
            url: url.clone(),
            status: status.as_u16(),
            content_type,
            content,
            links: Vec::new(),
            redirect,
        };

        if page.has_text() {
            page.links = extract_links(&page.content, &page.url);
        }

        Ok(page)
    }
}

/// Resolves a `Location` header against the requested URL
fn resolve_location(url: &Url, location: &str) -> Option<Url> {
    let target = url.join(location.trim()).ok()?;
    normalize_parsed(target).ok()
}
