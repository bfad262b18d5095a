//! URL handling module for Wordsmith
//!
//! This module provides URL normalization for the visited set and the host
//! key used for per-host politeness.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::host_key;
pub use normalize::{normalize_parsed, normalize_url};

use ::url::Url;

/// Returns true if `candidate` lives on the same host as `seed`
///
/// Hosts are compared by their politeness key, so a different port is a
/// different host.
pub fn same_host(seed: &Url, candidate: &Url) -> bool {
    match (host_key(seed), host_key(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
