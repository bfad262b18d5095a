use crate::UrlError;
use url::Url;

/// Normalizes a URL string so equivalent links share one visited-set entry
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Reject URLs without a host
/// 4. Lowercase the host
/// 5. Remove the fragment (everything after #)
/// 6. Empty path becomes /
///
/// The query string is kept verbatim.
///
/// # Examples
///
/// ```
/// use wordsmith::url::normalize_url;
///
/// let url = normalize_url("http://EXAMPLE.COM/page#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already-parsed URL
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    if host.is_empty() {
        return Err(UrlError::MissingHost);
    }

    let lowered = host.to_lowercase();
    if lowered != host {
        url.set_host(Some(&lowered))
            .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;
    }

    url.set_fragment(None);

    if url.path().is_empty() {
        url.set_path("/");
    }

    Ok(url)
}
