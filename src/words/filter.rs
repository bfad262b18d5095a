//! Token normalization and length filtering

/// Characters trimmed from both ends of every token
pub const STRIP_CHARS: &[char] = &[
    ' ', ';', '.', '!', ':', '=', '@', '#', '$', '"', '%', '^', '&', '*', '(', ')', '<', '>', '?',
    '\'', ',', '-',
];

/// Turns raw page text into candidate words
///
/// A token is lowercased, stripped of [`STRIP_CHARS`] at both ends, and kept
/// only if its length is strictly between `min_length` and `max_length`.
/// Words of exactly `min_length` or `max_length` characters are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    min_length: usize,
    max_length: usize,
}

impl WordFilter {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Normalizes one token and applies the length window
    ///
    /// # Returns
    ///
    /// * `Some(String)` - The accepted word
    /// * `None` - The token is rejected
    pub fn normalize(&self, token: &str) -> Option<String> {
        let word = normalize_token(token);
        self.accepts(&word).then_some(word)
    }

    /// Returns true if an already-normalized word fits the length window
    pub fn accepts(&self, word: &str) -> bool {
        let length = word.chars().count();
        length > self.min_length && length < self.max_length
    }

    /// Splits text on whitespace and yields every accepted word
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split_whitespace()
            .filter_map(move |token| self.normalize(token))
    }
}

/// Lowercases a token and trims the strip set from both ends
pub fn normalize_token(token: &str) -> String {
    token.to_lowercase().trim_matches(STRIP_CHARS).to_string()
}
