//! Guess evaluation against a solution word
//!
//! Feedback is one tag per letter position:
//! - `Absent` = letter not in word (or all its occurrences already accounted for)
//! - `Present` = letter in word, wrong position
//! - `Correct` = letter in the correct position
//!
//! Feedback is never stored on its own; it is recomputed from the
//! (guess, solution) pair whenever it is needed.

use super::Word;
use rustc_hash::FxHashMap;
use std::fmt;

/// Per-letter classification
///
/// Ordered so that a better-known state compares greater:
/// `Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterState {
    Absent,
    Present,
    Correct,
}

impl LetterState {
    /// Glyph used in shareable results
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
        }
    }
}

/// Evaluation of one guess against one solution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback(Vec<LetterState>);

impl Feedback {
    /// Evaluate `guess` against `solution`
    ///
    /// Implements duplicate-aware feedback: a letter is credited at most as
    /// many times as it occurs in the solution, and exact matches are
    /// credited before misplaced ones.
    ///
    /// # Algorithm
    /// 1. First pass: mark all exact matches and remove them from the available pool
    /// 2. Second pass: mark present-but-wrong-position from the remaining pool
    ///
    /// Both words must have the same length; the session never evaluates
    /// mismatched lengths.
    ///
    /// # Examples
    /// ```
    /// use quotle::core::{Feedback, LetterState, Word};
    ///
    /// let guess = Word::new("eerie").unwrap();
    /// let solution = Word::new("sheet").unwrap();
    /// let feedback = Feedback::calculate(&guess, &solution);
    ///
    /// assert_eq!(feedback.states()[0], LetterState::Present);
    /// assert_eq!(feedback.states()[1], LetterState::Present);
    /// assert_eq!(feedback.states()[4], LetterState::Absent);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, solution: &Word) -> Self {
        debug_assert_eq!(guess.len(), solution.len(), "guess and solution lengths differ");

        let guess_chars = guess.chars();
        let solution_chars = solution.chars();
        let mut result = vec![LetterState::Absent; guess_chars.len()];
        let mut available = solution.char_counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess_chars.iter().zip(solution_chars).enumerate() {
            if g == s {
                result[i] = LetterState::Correct;
                if let Some(count) = available.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but letter still available
        for (i, &g) in guess_chars.iter().enumerate() {
            if result[i] == LetterState::Correct {
                continue;
            }
            if let Some(count) = available.get_mut(&g)
                && *count > 0
            {
                result[i] = LetterState::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Tags in letter order
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[LetterState] {
        &self.0
    }

    /// Check if every letter is correct
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.0.iter().all(|&s| s == LetterState::Correct)
    }

    /// Count the number of correct letters
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterState::Correct).count()
    }

    /// Count the number of present letters
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterState::Present).count()
    }

    /// Convert feedback to a glyph row like "🟩🟨⬛⬛🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.glyph()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji())
    }
}

/// Best-known state of every letter guessed so far
///
/// Rebuilt from the full guess history each time rather than updated
/// incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterStatuses(FxHashMap<u8, LetterState>);

impl LetterStatuses {
    /// Build the status map for `guesses` against `solution`
    ///
    /// A letter is `Correct` once it was placed right anywhere, `Present` if
    /// it occurs in the solution, and `Absent` only if the solution lacks it.
    #[must_use]
    pub fn from_guesses(guesses: &[Word], solution: &Word) -> Self {
        let solution_chars = solution.chars();
        let mut statuses: FxHashMap<u8, LetterState> = FxHashMap::default();

        for guess in guesses {
            for (i, &letter) in guess.chars().iter().enumerate() {
                let state = if solution_chars.get(i) == Some(&letter) {
                    LetterState::Correct
                } else if solution.has_letter(letter) {
                    LetterState::Present
                } else {
                    LetterState::Absent
                };

                let entry = statuses.entry(letter).or_insert(state);
                *entry = (*entry).max(state);
            }
        }

        Self(statuses)
    }

    /// Known state of `letter`, if it has been guessed
    #[must_use]
    pub fn get(&self, letter: u8) -> Option<LetterState> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

    /// Number of distinct letters guessed
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterState::{Absent, Correct, Present};

    fn eval(guess: &str, solution: &str) -> Vec<LetterState> {
        let guess = Word::new(guess).unwrap();
        let solution = Word::new(solution).unwrap();
        Feedback::calculate(&guess, &solution).states().to_vec()
    }

    #[test]
    fn feedback_all_absent() {
        assert_eq!(eval("abcd", "wxyz"), vec![Absent; 4]);
    }

    #[test]
    fn feedback_exact_match_is_perfect() {
        for word in ["chance", "goat", "thermostat", "aaaa", "mississippi"] {
            let w = Word::new(word).unwrap();
            let feedback = Feedback::calculate(&w, &w);
            assert!(feedback.is_perfect(), "{word} should match itself");
            assert_eq!(feedback.count_correct(), word.len());
        }
    }

    #[test]
    fn feedback_repeated_guess_letter_not_over_credited() {
        // SHEET has two E's; EERIE has three. Only two may be credited.
        assert_eq!(
            eval("eerie", "sheet"),
            vec![Present, Present, Absent, Absent, Absent]
        );
    }

    #[test]
    fn feedback_exact_matches_claim_letters_first() {
        // Both L's in HELLO are consumed by exact matches at positions 2 and 3,
        // so the leading L must be absent rather than present.
        assert_eq!(
            eval("lolly", "hello"),
            vec![Absent, Present, Correct, Correct, Absent]
        );
    }

    #[test]
    fn feedback_repeated_solution_letter() {
        // EERIE has three E's; ERASE places two of them exactly
        assert_eq!(
            eval("erase", "eerie"),
            vec![Correct, Present, Absent, Absent, Correct]
        );
    }

    #[test]
    fn feedback_credit_never_exceeds_solution_count() {
        let cases = [
            ("eerie", "sheet"),
            ("lolly", "hello"),
            ("aaaaaa", "banana"),
            ("pepper", "puppet"),
            ("tattoo", "potato"),
        ];

        for (guess, solution) in cases {
            let states = eval(guess, solution);
            for letter in guess.bytes() {
                let credited = guess
                    .bytes()
                    .zip(&states)
                    .filter(|&(g, s)| g == letter && *s != Absent)
                    .count();
                let available = solution.bytes().filter(|&c| c == letter).count();
                assert!(
                    credited <= available,
                    "{guess} vs {solution}: '{}' credited {credited} > {available}",
                    letter as char
                );
            }
            for (i, (g, s)) in guess.bytes().zip(solution.bytes()).enumerate() {
                assert_eq!(states[i] == Correct, g == s, "{guess} vs {solution} at {i}");
            }
        }
    }

    #[test]
    fn feedback_emoji() {
        let guess = Word::new("erase").unwrap();
        let solution = Word::new("eerie").unwrap();
        let feedback = Feedback::calculate(&guess, &solution);
        assert_eq!(feedback.to_emoji(), "🟩🟨⬛⬛🟩");
        assert_eq!(feedback.count_present(), 1);
    }

    #[test]
    fn letter_statuses_keep_best_state() {
        let solution = Word::new("goat").unwrap();
        let guesses = vec![Word::new("toga").unwrap(), Word::new("boat").unwrap()];
        let statuses = LetterStatuses::from_guesses(&guesses, &solution);

        // T was present in TOGA, then correct in BOAT
        assert_eq!(statuses.get(b't'), Some(Correct));
        // O correct in both
        assert_eq!(statuses.get(b'o'), Some(Correct));
        // G only ever misplaced
        assert_eq!(statuses.get(b'g'), Some(Present));
        assert_eq!(statuses.get(b'b'), Some(Absent));
        assert_eq!(statuses.get(b'z'), None);
        assert_eq!(statuses.len(), 5);
    }

    #[test]
    fn letter_statuses_correct_not_downgraded() {
        let solution = Word::new("goat").unwrap();
        let guesses = vec![Word::new("goal").unwrap(), Word::new("agog").unwrap()];
        let statuses = LetterStatuses::from_guesses(&guesses, &solution);
        assert_eq!(statuses.get(b'g'), Some(Correct));
        assert_eq!(statuses.get(b'a'), Some(Correct));
        assert_eq!(statuses.get(b'l'), Some(Absent));
    }

    #[test]
    fn letter_statuses_surplus_copy_not_absent() {
        let solution = Word::new("sheet").unwrap();
        let guess = Word::new("eerie").unwrap();
        // Third E scores absent, but E is in the solution
        let feedback = Feedback::calculate(&guess, &solution);
        assert_eq!(feedback.states()[4], Absent);

        let statuses = LetterStatuses::from_guesses(&[guess], &solution);
        assert_eq!(statuses.get(b'e'), Some(Present));
        assert_eq!(statuses.get(b'r'), Some(Absent));
        assert_eq!(statuses.get(b'i'), Some(Absent));
    }

    #[test]
    fn letter_statuses_empty_history() {
        let solution = Word::new("goat").unwrap();
        assert!(LetterStatuses::from_guesses(&[], &solution).is_empty());
    }
}
