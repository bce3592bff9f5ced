//! Solution and guess word representation
//!
//! A Word stores a lowercase ASCII word of any non-zero length, as used both for
//! puzzle solutions and for submitted guesses.

use rustc_hash::FxHashMap;
use std::fmt;

/// A lowercase, letters-only word
///
/// Stores the word as bytes so evaluation can index positions directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    Empty,
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Word must contain at least one letter"),
            Self::NonAscii => write!(f, "Word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "Word contains invalid characters"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word from a string
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The string is empty
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use quotle::core::Word;
    ///
    /// let word = Word::new("Chance").unwrap();
    /// assert_eq!(word.text(), "chance");
    ///
    /// assert!(Word::new("two words").is_err());
    /// assert!(Word::new("").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    /// Derive a word from a raw quote token
    ///
    /// Strips every non-alphabetic character and lowercases the rest.
    /// Returns `None` when nothing is left.
    ///
    /// # Examples
    /// ```
    /// use quotle::core::Word;
    ///
    /// assert_eq!(Word::from_token("I've").unwrap().text(), "ive");
    /// assert_eq!(Word::from_token("chance.").unwrap().text(), "chance");
    /// assert!(Word::from_token("--").is_none());
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let text: String = token
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if text.is_empty() { None } else { Some(Self { text }) }
    }

    /// Wrap text already known to be lowercase ASCII letters
    pub(crate) fn from_lowercase(text: &str) -> Self {
        debug_assert!(!text.is_empty() && text.bytes().all(|b| b.is_ascii_lowercase()));
        Self {
            text: text.to_string(),
        }
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters in the word
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: u8) -> bool {
        self.chars().contains(&letter)
    }

    /// Get the count of each letter in the word
    ///
    /// Used for evaluation with duplicate letters.
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &ch in self.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("chance").unwrap();
        assert_eq!(word.text(), "chance");
        assert_eq!(word.chars(), b"chance");
        assert_eq!(word.len(), 6);
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("KETTLE").unwrap();
        assert_eq!(word.text(), "kettle");

        let word2 = Word::new("KeTtLe").unwrap();
        assert_eq!(word2.text(), "kettle");
    }

    #[test]
    fn word_creation_invalid() {
        assert_eq!(Word::new(""), Err(WordError::Empty));
        assert_eq!(Word::new("café"), Err(WordError::NonAscii));
        assert_eq!(Word::new("tent!"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("two words"), Err(WordError::InvalidCharacters));
    }

    #[test]
    fn word_from_token_strips_punctuation() {
        assert_eq!(Word::from_token("\"Quiet.\"").unwrap().text(), "quiet");
        assert_eq!(Word::from_token("Let's").unwrap().text(), "lets");
        assert_eq!(Word::from_token("ninety-nine").unwrap().text(), "ninetynine");
        assert!(Word::from_token("").is_none());
        assert!(Word::from_token("...").is_none());
        assert!(Word::from_token("42").is_none());
    }

    #[test]
    fn word_has_letter() {
        let word = Word::new("pigeon").unwrap();
        assert!(word.has_letter(b'p'));
        assert!(word.has_letter(b'n'));
        assert!(!word.has_letter(b'z'));
    }

    #[test]
    fn word_char_counts() {
        let word = Word::new("sheet").unwrap();
        let counts = word.char_counts();
        assert_eq!(counts.get(&b's'), Some(&1));
        assert_eq!(counts.get(&b'h'), Some(&1));
        assert_eq!(counts.get(&b'e'), Some(&2));
        assert_eq!(counts.get(&b't'), Some(&1));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn word_display() {
        let word = Word::new("goat").unwrap();
        assert_eq!(format!("{word}"), "goat");
    }
}
