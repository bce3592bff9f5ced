//! Quote corpus for puzzle generation
//!
//! Provides the immutable list of quotes, the loader that reads it once per
//! process, and the selector that turns a quote into a puzzle.

mod embedded;
pub mod loader;
pub mod selector;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use embedded::{EMBEDDED_QUOTES, EXCLUDED_WORDS, EXCLUDED_WORDS_COUNT};
pub use loader::{CorpusError, CorpusLoader, CorpusSource};
pub use selector::{Puzzle, SelectError, WordSelector};

/// A single attributed quote
///
/// Field names follow the JSON interchange format, where the text is stored
/// under `quote`. Extra fields in the source are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: String,
    #[serde(rename = "quote")]
    pub text: String,
    pub person: String,
    pub episode: String,
}

impl QuoteRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        person: impl Into<String>,
        episode: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            person: person.into(),
            episode: episode.into(),
        }
    }
}

/// Immutable collection of quotes with lookup by identifier
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    quotes: Vec<QuoteRecord>,
    by_id: FxHashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus from records
    ///
    /// When identifiers repeat, lookup resolves to the first record.
    #[must_use]
    pub fn new(quotes: Vec<QuoteRecord>) -> Self {
        let mut by_id = FxHashMap::default();
        for (index, quote) in quotes.iter().enumerate() {
            by_id.entry(quote.id.clone()).or_insert(index);
        }
        Self { quotes, by_id }
    }

    #[must_use]
    pub fn quotes(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    /// Find the quote with exactly this identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&QuoteRecord> {
        self.by_id.get(id).map(|&index| &self.quotes[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_count_matches_const() {
        assert_eq!(EXCLUDED_WORDS.len(), EXCLUDED_WORDS_COUNT);
    }

    #[test]
    fn excluded_words_sorted_lowercase() {
        for pair in EXCLUDED_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "'{}' not sorted before '{}'", pair[0], pair[1]);
        }
        for &word in EXCLUDED_WORDS {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Excluded word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn embedded_corpus_ids_unique() {
        let corpus = loader::parse_corpus(EMBEDDED_QUOTES).unwrap();
        assert!(!corpus.is_empty());
        let unique: std::collections::HashSet<_> = corpus.quotes().iter().map(|q| &q.id).collect();
        assert_eq!(unique.len(), corpus.len());
    }

    #[test]
    fn corpus_lookup_prefers_first_duplicate() {
        let corpus = Corpus::new(vec![
            QuoteRecord::new("7", "first text here", "A", "One"),
            QuoteRecord::new("7", "second text here", "B", "Two"),
            QuoteRecord::new("8", "third text here", "C", "Three"),
        ]);
        assert_eq!(corpus.get("7").unwrap().person, "A");
        assert_eq!(corpus.get("8").unwrap().person, "C");
        assert!(corpus.get("9").is_none());
        assert_eq!(corpus.len(), 3);
    }
}
