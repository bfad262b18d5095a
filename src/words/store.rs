//! Concurrent dedup store for accepted words

use dashmap::DashSet;

/// The accumulating wordlist
///
/// Shared by every fetch worker behind an `Arc`. Insertion is lock-sharded,
/// so workers contributing different words rarely contend, and a word added
/// by one worker is immediately visible to every other.
#[derive(Debug, Default)]
pub struct WordSet {
    words: DashSet<String>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word, returning true if it was not already present
    pub fn try_add(&self, word: String) -> bool {
        self.words.insert(word)
    }

    /// Inserts every word, returning how many were new
    pub fn extend<I>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        words
            .into_iter()
            .filter(|word| self.try_add(word.clone()))
            .count()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Copies the words out in sorted order
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().map(|w| w.key().clone()).collect();
        words.sort_unstable();
        words
    }
}
