//! State module for tracking crawl progress
//!
//! This module provides state management for pages and hosts during a crawl.
//!
//! # Components
//!
//! - `PageState`: Lifecycle of a single URL (discovered, queued, in flight, completed, failed)
//! - `DomainState`: Per-host fetch history used for politeness
//! - `DomainThrottle`: The shared, lock-guarded table of `DomainState`s

mod domain_state;
mod page_state;
mod throttle;

// Re-export main types
pub use domain_state::DomainState;
pub use page_state::PageState;
pub use throttle::DomainThrottle;
