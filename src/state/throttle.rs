//! Shared per-host politeness table
//!
//! Every worker consults the same [`DomainThrottle`] before starting a fetch.
//! Checking and recording happen under one lock, so two workers can never both
//! claim the same host inside the delay window.

use crate::state::DomainState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Concurrency-safe map from host key to [`DomainState`]
#[derive(Debug)]
pub struct DomainThrottle {
    delay: Duration,
    domains: Mutex<HashMap<String, DomainState>>,
}

impl DomainThrottle {
    /// Creates a throttle enforcing `delay` between fetch starts per host
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            domains: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically checks the host and, if it is ready, records a fetch start
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The caller now owns this host's slot and may fetch
    /// * `Err(Duration)` - Time left until the host becomes ready
    pub fn try_reserve(&self, host: &str, now: Instant) -> Result<(), Duration> {
        let mut domains = self.lock();
        let state = domains
            .entry(host.to_string())
            .or_insert_with(DomainState::new);

        match state.time_until_next_fetch(self.delay, now) {
            Some(wait) => Err(wait),
            None => {
                state.record_fetch(now);
                Ok(())
            }
        }
    }

    /// Waits until the host is ready, then records a fetch start
    pub async fn reserve(&self, host: &str) {
        loop {
            match self.try_reserve(host, Instant::now()) {
                Ok(()) => return,
                Err(wait) => {
                    tracing::trace!("Host {} not ready, sleeping {:?}", host, wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Snapshot of one host's state
    #[cfg(test)]
    fn domain_state(&self, host: &str) -> Option<DomainState> {
        self.lock().get(host).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DomainState>> {
        // Poison is ignored: no update leaves an entry half-written.
        self.domains.lock().unwrap_or_else(|e| e.into_inner())
    }
}
