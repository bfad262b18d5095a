use std::time::{Duration, Instant};

/// Tracks the politeness state of one host during crawling
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of fetches started against this host
    pub request_count: u32,

    /// Start time of the most recent fetch to this host
    pub last_fetch_time: Option<Instant>,
}

impl DomainState {
    /// Creates a new DomainState with no fetch history
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next fetch may start
    ///
    /// Returns None if a fetch can start now, or the duration to wait otherwise.
    pub fn time_until_next_fetch(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_fetch_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < delay {
            Some(delay - elapsed)
        } else {
            None
        }
    }

    /// Records that a fetch started at `now`
    ///
    /// The timestamp never moves backwards, even if callers race with
    /// slightly stale instants.
    pub fn record_fetch(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_fetch_time = Some(match self.last_fetch_time {
            Some(last) if last > now => last,
            _ => now,
        });
    }
}
