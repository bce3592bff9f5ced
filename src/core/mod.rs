//! Core domain types for the puzzle
//!
//! This module contains the fundamental domain types with no I/O.
//! All types here are pure, testable, and independent of the session.

mod feedback;
pub mod hard_mode;
mod word;

pub use feedback::{Feedback, LetterState, LetterStatuses};
pub use hard_mode::HardModeViolation;
pub use word::{Word, WordError};

/// Maximum number of guesses per puzzle
pub const MAX_GUESSES: usize = 5;

/// Shortest word that can be a solution
pub const MIN_WORD_LENGTH: usize = 4;

/// Default upper bound on solution length
pub const DEFAULT_MAX_WORD_LENGTH: usize = 8;

/// Largest value the max word length setting accepts
pub const MAX_CONFIGURABLE_WORD_LENGTH: usize = 15;
