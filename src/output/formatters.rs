//! Formatting utilities for terminal output

use crate::core::{Feedback, LetterState, LetterStatuses, Word};
use colored::{ColoredString, Colorize};

/// Keyboard rows shown under the board
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Colour one uppercase letter tile by its state
#[must_use]
pub fn letter_tile(letter: char, state: Option<LetterState>) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase());
    match state {
        Some(LetterState::Correct) => tile.black().on_green().bold(),
        Some(LetterState::Present) => tile.black().on_yellow().bold(),
        Some(LetterState::Absent) => tile.white().on_bright_black(),
        None => tile.bright_white(),
    }
}

/// Render a scored guess as coloured tiles
#[must_use]
pub fn feedback_row(guess: &Word, feedback: &Feedback) -> String {
    guess
        .text()
        .chars()
        .zip(feedback.states())
        .map(|(letter, &state)| letter_tile(letter, Some(state)).to_string())
        .collect()
}

/// Render an unsubmitted row of `len` blank tiles
#[must_use]
pub fn empty_row(len: usize) -> String {
    " _ ".repeat(len).bright_black().to_string()
}

/// Render the keyboard with every guessed letter coloured
#[must_use]
pub fn keyboard(statuses: &LetterStatuses) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| {
                    let state = u8::try_from(c).ok().and_then(|b| statuses.get(b));
                    letter_tile(c, state).to_string()
                })
                .collect()
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_row_keeps_letter_order() {
        colored::control::set_override(false);
        let guess = Word::new("boat").unwrap();
        let solution = Word::new("goat").unwrap();
        let row = feedback_row(&guess, &Feedback::calculate(&guess, &solution));
        assert_eq!(row, " B  O  A  T ");
    }

    #[test]
    fn empty_row_width() {
        colored::control::set_override(false);
        assert_eq!(empty_row(3), " _  _  _ ");
    }

    #[test]
    fn keyboard_has_every_letter() {
        colored::control::set_override(false);
        let rows = keyboard(&LetterStatuses::default());
        assert_eq!(rows.len(), 3);
        let letters: usize = rows.iter().map(|r| r.matches(char::is_alphabetic).count()).sum();
        assert_eq!(letters, 26);
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
