/// Page state definitions for tracking crawl progress
///
/// This module defines all possible states a URL can be in during a crawl.
use std::fmt;

/// Represents the current state of a URL in the crawl process
///
/// ```text
/// Discovered -> Queued -> InFlight -> Completed
///                                  \-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link extracted from a page, not yet checked against the frontier
    Discovered,

    /// Accepted by the frontier and waiting for a worker
    Queued,

    /// A worker is fetching the page
    InFlight,

    // ===== Terminal States =====
    /// Page was fetched and its text and links were processed
    Completed,

    /// Fetch failed after all retries; the page contributes nothing
    Failed,
}

impl PageState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Queued)
                | (Self::Queued, Self::InFlight)
                | (Self::InFlight, Self::Completed)
                | (Self::InFlight, Self::Failed)
        )
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Queued => "queued",
            Self::InFlight => "in_flight",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
