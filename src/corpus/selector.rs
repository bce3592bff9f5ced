//! Solution word selection
//!
//! Turns a quote into a puzzle by picking one guessable word from its text.
//! Random selection is used for normal play; selection by id is deterministic
//! so that a shared puzzle link yields the same solution for everyone.

use super::{Corpus, EXCLUDED_WORDS, QuoteRecord};
use crate::core::{MIN_WORD_LENGTH, Word};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const FALLBACK_ID: &str = "fallback";
const FALLBACK_TEXT: &str = "A slim chance is better than no chance at all.";
const FALLBACK_SOLUTION: &str = "chance";

/// Why a puzzle could not be built from a specific quote
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no quote with id \"{id}\"")]
    NotFound { id: String },
    #[error("quote \"{id}\" has no guessable word of at most {max_length} letters")]
    NoGuessableWord { id: String, max_length: usize },
}

/// An active puzzle: the solution and the quote it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    solution: Word,
    quote: QuoteRecord,
    span: Range<usize>,
}

impl Puzzle {
    /// The fixed puzzle used when the corpus yields nothing playable
    #[must_use]
    pub fn fallback() -> Self {
        let start = FALLBACK_TEXT.find(FALLBACK_SOLUTION).unwrap_or_default();
        Self {
            solution: Word::from_lowercase(FALLBACK_SOLUTION),
            quote: QuoteRecord::new(FALLBACK_ID, FALLBACK_TEXT, "System", "Fallback"),
            span: start..start + FALLBACK_SOLUTION.len(),
        }
    }

    #[must_use]
    pub const fn solution(&self) -> &Word {
        &self.solution
    }

    #[must_use]
    pub const fn quote(&self) -> &QuoteRecord {
        &self.quote
    }

    /// The exact token of the quote the solution was derived from,
    /// punctuation and case included
    #[must_use]
    pub fn surface_form(&self) -> &str {
        &self.quote.text[self.span.clone()]
    }

    /// Quote text split around the surface form: (before, word, after)
    #[must_use]
    pub fn quote_parts(&self) -> (&str, &str, &str) {
        let text = &self.quote.text;
        (
            &text[..self.span.start],
            &text[self.span.clone()],
            &text[self.span.end..],
        )
    }

    /// Quote text with the solution's letters replaced by `_`
    ///
    /// Punctuation inside the token and all surrounding text is kept, so the
    /// number of placeholders equals the solution length.
    ///
    /// # Examples
    /// ```
    /// use quotle::corpus::Puzzle;
    ///
    /// let puzzle = Puzzle::fallback();
    /// assert_eq!(puzzle.masked_text(), "A slim ______ is better than no chance at all.");
    /// ```
    #[must_use]
    pub fn masked_text(&self) -> String {
        let (before, word, after) = self.quote_parts();
        let mut masked = String::with_capacity(self.quote.text.len());
        masked.push_str(before);
        masked.extend(
            word.chars()
                .map(|c| if c.is_ascii_alphabetic() { '_' } else { c }),
        );
        masked.push_str(after);
        masked
    }
}

/// A guessable word located inside a quote
struct Candidate {
    word: Word,
    span: Range<usize>,
}

/// Split quote text on single spaces, keeping each token's byte offset
fn tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(' ').scan(0, |offset, token| {
        let start = *offset;
        *offset += token.len() + 1;
        Some((start, token))
    })
}

/// Picks solution words out of the corpus
#[derive(Debug, Clone)]
pub struct WordSelector {
    corpus: Arc<Corpus>,
    excluded: FxHashSet<String>,
}

impl WordSelector {
    /// Create a selector using the bundled exclusion list
    #[must_use]
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self::with_exclusions(corpus, EXCLUDED_WORDS)
    }

    /// Create a selector with a custom exclusion list
    #[must_use]
    pub fn with_exclusions(corpus: Arc<Corpus>, excluded: &[&str]) -> Self {
        Self {
            corpus,
            excluded: excluded.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Check whether a raw token can be a solution
    ///
    /// A token is guessable if, once stripped of non-letters and lowercased,
    /// it is non-empty, its length lies in `[MIN_WORD_LENGTH, max_length]`
    /// and it is not excluded.
    #[must_use]
    pub fn guessable(&self, token: &str, max_length: usize) -> Option<Word> {
        let word = Word::from_token(token)?;
        let fits = (MIN_WORD_LENGTH..=max_length).contains(&word.len());
        (fits && !self.excluded.contains(word.text())).then_some(word)
    }

    fn candidates(&self, quote: &QuoteRecord, max_length: usize) -> Vec<Candidate> {
        tokens(&quote.text)
            .filter_map(|(start, token)| {
                self.guessable(token, max_length).map(|word| Candidate {
                    word,
                    span: start..start + token.len(),
                })
            })
            .collect()
    }

    /// Check whether a quote can be used for random play
    ///
    /// It needs more than two tokens and at least one guessable word.
    #[must_use]
    pub fn is_eligible(&self, quote: &QuoteRecord, max_length: usize) -> bool {
        tokens(&quote.text).count() > 2
            && tokens(&quote.text).any(|(_, token)| self.guessable(token, max_length).is_some())
    }

    /// Number of guessable words in a quote
    #[must_use]
    pub fn count_guessable(&self, quote: &QuoteRecord, max_length: usize) -> usize {
        tokens(&quote.text)
            .filter(|(_, token)| self.guessable(token, max_length).is_some())
            .count()
    }

    /// Pick a random puzzle
    ///
    /// Chooses uniformly among eligible quotes, then uniformly among the
    /// guessable words of that quote. Returns the fallback puzzle when no
    /// quote is eligible.
    pub fn select_random<R: Rng>(&self, max_length: usize, rng: &mut R) -> Puzzle {
        let eligible: Vec<&QuoteRecord> = self
            .corpus
            .quotes()
            .iter()
            .filter(|quote| self.is_eligible(quote, max_length))
            .collect();

        if eligible.is_empty() {
            warn!(max_length, "no eligible quotes, using fallback puzzle");
            return Puzzle::fallback();
        }

        let quote = eligible[rng.random_range(0..eligible.len())];
        let mut candidates = self.candidates(quote, max_length);
        // Eligibility guarantees at least one candidate
        let candidate = candidates.swap_remove(rng.random_range(0..candidates.len()));

        debug!(id = %quote.id, eligible = eligible.len(), "selected random puzzle");
        Puzzle {
            solution: candidate.word,
            quote: quote.clone(),
            span: candidate.span,
        }
    }

    /// Build the puzzle for a specific quote
    ///
    /// Always picks the first guessable word, so the same id and length
    /// limit give the same solution every time.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::NotFound` if no quote has this id, or
    /// `SelectError::NoGuessableWord` if the quote has no word within the
    /// length limit.
    pub fn select_by_id(&self, id: &str, max_length: usize) -> Result<Puzzle, SelectError> {
        let quote = self.corpus.get(id).ok_or_else(|| SelectError::NotFound {
            id: id.to_string(),
        })?;

        let candidate = self
            .candidates(quote, max_length)
            .into_iter()
            .next()
            .ok_or_else(|| SelectError::NoGuessableWord {
                id: id.to_string(),
                max_length,
            })?;

        debug!(id, solution_length = candidate.word.len(), "selected puzzle by id");
        Ok(Puzzle {
            solution: candidate.word,
            quote: quote.clone(),
            span: candidate.span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_MAX_WORD_LENGTH;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn selector(quotes: Vec<QuoteRecord>) -> WordSelector {
        WordSelector::with_exclusions(Arc::new(Corpus::new(quotes)), &["that", "with"])
    }

    fn sample() -> WordSelector {
        selector(vec![
            QuoteRecord::new("1", "I'm not saying that I'm brilliant, okay?", "Gerald", "Pilot"),
            QuoteRecord::new("2", "Quiet.", "Priya", "Library"),
            QuoteRecord::new("3", "Run with it now", "Marcus", "Fun Run"),
            QuoteRecord::new("4", "Confidence is just panic wearing a nicer jacket.", "Marcus", "Pitch"),
        ])
    }

    #[test]
    fn guessable_applies_filters() {
        let s = sample();
        assert_eq!(s.guessable("brilliant,", 10).unwrap().text(), "brilliant");
        assert!(s.guessable("brilliant,", 8).is_none()); // too long
        assert!(s.guessable("Run", 8).is_none()); // too short
        assert!(s.guessable("That", 8).is_none()); // excluded
        assert!(s.guessable("...", 8).is_none()); // empty after stripping
        assert_eq!(s.guessable("saying", 6).unwrap().text(), "saying");
    }

    #[test]
    fn eligibility_needs_three_tokens_and_a_word() {
        let s = sample();
        let quotes = s.corpus().quotes();
        assert!(s.is_eligible(&quotes[0], DEFAULT_MAX_WORD_LENGTH));
        // Single token
        assert!(!s.is_eligible(&quotes[1], DEFAULT_MAX_WORD_LENGTH));
        // Only short or excluded words
        assert!(!s.is_eligible(&quotes[2], DEFAULT_MAX_WORD_LENGTH));
    }

    #[test]
    fn select_by_id_picks_first_guessable_word() {
        let s = sample();
        let puzzle = s.select_by_id("1", DEFAULT_MAX_WORD_LENGTH).unwrap();
        // "I'm" and "not" are too short, "saying" is first
        assert_eq!(puzzle.solution().text(), "saying");
        assert_eq!(puzzle.surface_form(), "saying");
        assert_eq!(puzzle.quote().person, "Gerald");
    }

    #[test]
    fn select_by_id_is_deterministic() {
        let s = sample();
        let first = s.select_by_id("4", 6).unwrap();
        for _ in 0..10 {
            assert_eq!(s.select_by_id("4", 6).unwrap(), first);
        }
        assert_eq!(first.solution().text(), "just");
    }

    #[test]
    fn select_by_id_respects_length_limit() {
        let s = sample();
        assert_eq!(
            s.select_by_id("4", DEFAULT_MAX_WORD_LENGTH).unwrap().solution().text(),
            "just"
        );
        assert_eq!(
            s.select_by_id("4", 15).unwrap().solution().text(),
            "confidence"
        );
    }

    #[test]
    fn select_by_id_errors() {
        let s = sample();
        assert_eq!(
            s.select_by_id("99", 8),
            Err(SelectError::NotFound { id: "99".to_string() })
        );
        assert_eq!(
            s.select_by_id("3", 8),
            Err(SelectError::NoGuessableWord { id: "3".to_string(), max_length: 8 })
        );
        // A single-token quote can still be loaded by id
        assert_eq!(s.select_by_id("2", 8).unwrap().solution().text(), "quiet");
    }

    #[test]
    fn select_random_stays_within_bounds() {
        let s = sample();
        let mut rng = StdRng::seed_from_u64(7);
        for max_length in MIN_WORD_LENGTH..=12 {
            for _ in 0..50 {
                let puzzle = s.select_random(max_length, &mut rng);
                let len = puzzle.solution().len();
                assert!(len >= MIN_WORD_LENGTH && len <= max_length, "{len} > {max_length}");
                assert!(["1", "4"].contains(&puzzle.quote().id.as_str()));
            }
        }
    }

    #[test]
    fn select_random_falls_back_when_nothing_eligible() {
        let s = selector(vec![
            QuoteRecord::new("1", "Quiet.", "Priya", "Library"),
            QuoteRecord::new("2", "Run with it", "Marcus", "Fun Run"),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = s.select_random(8, &mut rng);
        assert_eq!(puzzle, Puzzle::fallback());
        assert_eq!(puzzle.solution().text(), "chance");
        assert_eq!(puzzle.quote().id, "fallback");

        let empty = selector(Vec::new());
        assert_eq!(empty.select_random(8, &mut rng), Puzzle::fallback());
    }

    #[test]
    fn masked_text_preserves_punctuation() {
        let s = selector(vec![QuoteRecord::new(
            "1",
            "Let's circle back, pizza!",
            "Priya",
            "Away Day",
        )]);
        let puzzle = s.select_by_id("1", 8).unwrap();
        assert_eq!(puzzle.solution().text(), "lets");
        assert_eq!(puzzle.surface_form(), "Let's");
        assert_eq!(puzzle.masked_text(), "___'_ circle back, pizza!");
    }

    #[test]
    fn masked_text_targets_the_selected_token() {
        let s = selector(vec![QuoteRecord::new(
            "1",
            "Hi, pizza and more pizza.",
            "Priya",
            "Away Day",
        )]);
        let puzzle = s.select_by_id("1", 5).unwrap();
        assert_eq!(puzzle.solution().text(), "pizza");
        assert_eq!(puzzle.masked_text(), "Hi, _____ and more pizza.");
        assert_eq!(puzzle.quote_parts(), ("Hi, ", "pizza", " and more pizza."));
    }

    #[test]
    fn fallback_puzzle() {
        let puzzle = Puzzle::fallback();
        assert_eq!(puzzle.surface_form(), "chance");
        assert_eq!(puzzle.quote().person, "System");
        assert_eq!(puzzle.quote().episode, "Fallback");
    }
}
