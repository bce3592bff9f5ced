//! Hard mode guess constraints
//!
//! In hard mode every new guess must keep the letters revealed by the previous
//! guess: correct letters stay in place, present letters must be reused.

use super::{Feedback, LetterState, Word};
use thiserror::Error;

/// Reason a guess was refused in hard mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardModeViolation {
    /// A letter known to be correct was moved or replaced
    #[error("Letter {position} must be '{}'", .letter.to_ascii_uppercase())]
    MissingCorrect {
        /// Required letter, lowercase
        letter: char,
        /// 1-based position
        position: usize,
    },
    /// A letter known to be present was not reused
    #[error("Guess must contain '{}'", .letter.to_ascii_uppercase())]
    MissingPresent { letter: char },
}

/// Check `candidate` against the previous guess and its feedback
///
/// Rules are checked in order and the first violation wins:
/// 1. every `Correct` position of the previous guess keeps its letter
/// 2. every `Present` letter of the previous guess appears in `candidate`;
///    each occurrence consumes one letter of the candidate, so duplicate
///    present letters need duplicate occurrences
///
/// Only the latest guess is checked. Earlier guesses already passed the same
/// check, so their constraints are carried forward by the latest feedback.
///
/// # Errors
/// Returns the first `HardModeViolation` found.
///
/// # Examples
/// ```
/// use quotle::core::{Feedback, Word, hard_mode};
///
/// let solution = Word::new("goat").unwrap();
/// let previous = Word::new("boat").unwrap();
/// let feedback = Feedback::calculate(&previous, &solution);
///
/// assert!(hard_mode::validate(&previous, &feedback, &Word::new("moat").unwrap()).is_ok());
/// assert!(hard_mode::validate(&previous, &feedback, &Word::new("mops").unwrap()).is_err());
/// ```
pub fn validate(
    previous: &Word,
    feedback: &Feedback,
    candidate: &Word,
) -> Result<(), HardModeViolation> {
    let previous_chars = previous.chars();
    let candidate_chars = candidate.chars();
    let states = feedback.states();

    for (i, (&letter, &state)) in previous_chars.iter().zip(states).enumerate() {
        if state == LetterState::Correct && candidate_chars.get(i) != Some(&letter) {
            return Err(HardModeViolation::MissingCorrect {
                letter: char::from(letter),
                position: i + 1,
            });
        }
    }

    let mut remaining: Vec<u8> = candidate_chars.to_vec();
    let present = previous_chars
        .iter()
        .zip(states)
        .filter(|&(_, &state)| state == LetterState::Present)
        .map(|(&letter, _)| letter);

    for letter in present {
        match remaining.iter().position(|&c| c == letter) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => {
                return Err(HardModeViolation::MissingPresent {
                    letter: char::from(letter),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(previous: &str, solution: &str, candidate: &str) -> Result<(), HardModeViolation> {
        let previous = Word::new(previous).unwrap();
        let solution = Word::new(solution).unwrap();
        let feedback = Feedback::calculate(&previous, &solution);
        validate(&previous, &feedback, &Word::new(candidate).unwrap())
    }

    #[test]
    fn correct_letter_must_stay_in_place() {
        // O is correct at position 2 of BOAT vs GOAT
        assert_eq!(check("bxxx", "goat", "bxxx"), Ok(()));
        assert_eq!(
            check("boxx", "goat", "bxox"),
            Err(HardModeViolation::MissingCorrect { letter: 'o', position: 2 })
        );
        assert_eq!(check("boxx", "goat", "mopy"), Ok(()));
    }

    #[test]
    fn present_letter_must_be_reused() {
        // T is present in TXXX vs GOAT
        assert_eq!(
            check("txxx", "goat", "mops"),
            Err(HardModeViolation::MissingPresent { letter: 't' })
        );
        assert_eq!(check("txxx", "goat", "most"), Ok(()));
    }

    #[test]
    fn duplicate_present_letters_need_separate_occurrences() {
        // Both A's of XAXAXX are misplaced against BBCCAA
        let previous = "xaxaxx";
        let solution = "bbccaa";
        assert_eq!(
            check(previous, solution, "aqqqqq"),
            Err(HardModeViolation::MissingPresent { letter: 'a' })
        );
        assert_eq!(check(previous, solution, "aqqaqq"), Ok(()));
    }

    #[test]
    fn correct_violations_reported_before_present() {
        // G correct at 1, T present
        let result = check("gxtx", "goat", "xxxx");
        assert_eq!(
            result,
            Err(HardModeViolation::MissingCorrect { letter: 'g', position: 1 })
        );
    }

    #[test]
    fn absent_letters_are_unconstrained() {
        assert_eq!(check("wxyz", "goat", "wxyz"), Ok(()));
        assert_eq!(check("wxyz", "goat", "abcd"), Ok(()));
    }

    #[test]
    fn violation_messages() {
        let correct = HardModeViolation::MissingCorrect { letter: 'o', position: 2 };
        assert_eq!(correct.to_string(), "Letter 2 must be 'O'");

        let present = HardModeViolation::MissingPresent { letter: 't' };
        assert_eq!(present.to_string(), "Guess must contain 'T'");
    }
}
