//! Shareable results and puzzle links

use crate::core::{Feedback, MAX_GUESSES, Word};

/// Title at the start of a shared result
pub const SHARE_TITLE: &str = "Quotle";

/// Base URL used when rendering a puzzle link
pub const SHARE_BASE: &str = "https://quotle.app/";

/// Query parameter carrying a puzzle id
const LINK_PARAM: &str = "puzzle=";

/// Compact text summary of a finished puzzle
///
/// The first line holds the puzzle id and `guesses/MAX_GUESSES` (or
/// `X/MAX_GUESSES` on a loss), followed by one glyph row per guess.
///
/// # Examples
/// ```
/// use quotle::core::Word;
/// use quotle::game::share::share_text;
///
/// let solution = Word::new("goat").unwrap();
/// let guesses = [Word::new("boat").unwrap(), Word::new("goat").unwrap()];
/// let text = share_text("42", &guesses, &solution, true);
/// assert_eq!(text, "Quotle #42 2/5\n\n⬛🟩🟩🟩\n🟩🟩🟩🟩");
/// ```
#[must_use]
pub fn share_text(puzzle_id: &str, guesses: &[Word], solution: &Word, won: bool) -> String {
    let score = if won {
        guesses.len().to_string()
    } else {
        "X".to_string()
    };

    let grid: Vec<String> = guesses
        .iter()
        .map(|guess| Feedback::calculate(guess, solution).to_emoji())
        .collect();

    format!(
        "{SHARE_TITLE} #{puzzle_id} {score}/{MAX_GUESSES}\n\n{}",
        grid.join("\n")
    )
}

/// Link that opens a specific puzzle
#[must_use]
pub fn share_link(base: &str, puzzle_id: &str) -> String {
    format!("{base}#{LINK_PARAM}{puzzle_id}")
}

/// Extract a puzzle id from a bare id, a query string or a full link
///
/// Accepts `42`, `?puzzle=42`, `#puzzle=42` and any URL containing one of
/// those. Returns `None` when no id can be found.
///
/// # Examples
/// ```
/// use quotle::game::share::parse_puzzle_link;
///
/// assert_eq!(parse_puzzle_link("https://example.com/?puzzle=17&x=1").as_deref(), Some("17"));
/// assert_eq!(parse_puzzle_link("#puzzle=17").as_deref(), Some("17"));
/// assert_eq!(parse_puzzle_link("17").as_deref(), Some("17"));
/// assert_eq!(parse_puzzle_link("https://example.com/"), None);
/// ```
#[must_use]
pub fn parse_puzzle_link(input: &str) -> Option<String> {
    let input = input.trim();

    let id = if let Some(index) = input.find(LINK_PARAM) {
        let rest = &input[index + LINK_PARAM.len()..];
        rest.split(['&', '#']).next().unwrap_or_default()
    } else if input.contains(['?', '#', '/', '=']) {
        return None;
    } else {
        input
    };

    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_text_for_loss() {
        let solution = Word::new("goat").unwrap();
        let guesses: Vec<Word> = ["toga", "boat", "moat", "coat", "stoa"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect();
        let text = share_text("7", &guesses, &solution, false);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Quotle #7 X/5"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("🟨🟩🟨🟨"));
        assert_eq!(lines.clone().count(), 4);
    }

    #[test]
    fn share_link_round_trip() {
        let link = share_link("https://example.com/play", "23");
        assert_eq!(link, "https://example.com/play#puzzle=23");
        assert_eq!(parse_puzzle_link(&link).as_deref(), Some("23"));
    }

    #[test]
    fn parse_puzzle_link_edge_cases() {
        assert_eq!(parse_puzzle_link("  9  ").as_deref(), Some("9"));
        assert_eq!(parse_puzzle_link("?puzzle=").as_deref(), None);
        assert_eq!(parse_puzzle_link("").as_deref(), None);
        assert_eq!(parse_puzzle_link("?other=3"), None);
        assert_eq!(parse_puzzle_link("?a=1&puzzle=abc#top").as_deref(), Some("abc"));
    }
}
