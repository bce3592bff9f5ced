//! Single guess evaluation command
//!
//! Scores one guess against a solution without starting a game.

use crate::core::{Feedback, Word, WordError};

/// Result of checking a guess
pub struct CheckResult {
    pub guess: Word,
    pub solution: Word,
    pub feedback: Feedback,
}

impl CheckResult {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.feedback.is_perfect()
    }
}

/// Evaluate `guess` against `solution`
///
/// # Errors
///
/// Returns an error if either word is invalid, or `LengthMismatch` if the
/// two words differ in length.
pub fn check_guess(guess: &str, solution: &str) -> Result<CheckResult, CheckError> {
    let guess = Word::new(guess).map_err(CheckError::Guess)?;
    let solution = Word::new(solution).map_err(CheckError::Solution)?;

    if guess.len() != solution.len() {
        return Err(CheckError::LengthMismatch {
            guess: guess.len(),
            solution: solution.len(),
        });
    }

    let feedback = Feedback::calculate(&guess, &solution);
    Ok(CheckResult {
        guess,
        solution,
        feedback,
    })
}

/// Why a guess could not be checked
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("invalid guess: {0}")]
    Guess(WordError),
    #[error("invalid solution: {0}")]
    Solution(WordError),
    #[error("guess has {guess} letters but the solution has {solution}")]
    LengthMismatch { guess: usize, solution: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterState::{Absent, Correct, Present};

    #[test]
    fn check_scores_duplicates() {
        let result = check_guess("eerie", "sheet").unwrap();
        assert_eq!(
            result.feedback.states(),
            &[Present, Present, Absent, Absent, Absent]
        );
        assert!(!result.is_solved());
    }

    #[test]
    fn check_normalizes_case() {
        let result = check_guess("PIGEON", "pigeon").unwrap();
        assert!(result.is_solved());
        assert_eq!(result.guess.text(), "pigeon");
        assert!(result.feedback.states().iter().all(|&s| s == Correct));
    }

    #[test]
    fn check_rejects_bad_input() {
        assert_eq!(
            check_guess("goat", "pigeon").err(),
            Some(CheckError::LengthMismatch {
                guess: 4,
                solution: 6
            })
        );
        assert_eq!(
            check_guess("go at", "goats").err(),
            Some(CheckError::Guess(WordError::InvalidCharacters))
        );
        assert_eq!(
            check_guess("goat", "").err(),
            Some(CheckError::Solution(WordError::Empty))
        );
    }
}
