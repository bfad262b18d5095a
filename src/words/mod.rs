//! Word extraction pipeline
//!
//! - `WordFilter`: normalizes tokens and applies the length window
//! - `WordSet`: the shared, deduplicated wordlist

mod filter;
mod store;

pub use filter::{normalize_token, WordFilter, STRIP_CHARS};
pub use store::WordSet;
