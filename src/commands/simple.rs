//! Simple interactive CLI mode
//!
//! Line-based game without the TUI. Each line is either a guess or a
//! `:command`.

use crate::game::share::{SHARE_BASE, share_link};
use crate::game::{
    GameStatus, HintKind, HintOutcome, Key, KeyOutcome, Session, Setting, SkipOutcome, Store,
};
use crate::output::{print_board, print_notice, print_outcome};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    Guess(String),
    Hint(HintKind),
    Skip,
    GiveUp,
    New,
    Hard(bool),
    Unlimited(bool),
    Length(usize),
    Share,
    Help,
    Quit,
    /// Empty line
    Continue,
    Invalid(String),
}

fn parse_toggle(arg: Option<&str>) -> Option<bool> {
    match arg? {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a line of user input
#[must_use]
pub fn parse_input(line: &str) -> LineInput {
    let line = line.trim();
    if line.is_empty() {
        return LineInput::Continue;
    }

    let Some(command) = line.strip_prefix(':') else {
        return LineInput::Guess(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::to_lowercase);
    let arg = arg.as_deref();

    let parsed = match name.as_str() {
        "hint" | "h" => match arg {
            Some("person" | "p" | "who") => Some(LineInput::Hint(HintKind::Person)),
            Some("episode" | "e" | "where") => Some(LineInput::Hint(HintKind::Episode)),
            _ => None,
        },
        "skip" | "s" => Some(LineInput::Skip),
        "giveup" | "give-up" | "forfeit" => Some(LineInput::GiveUp),
        "new" | "n" => Some(LineInput::New),
        "hard" => parse_toggle(arg).map(LineInput::Hard),
        "unlimited" => parse_toggle(arg).map(LineInput::Unlimited),
        "length" | "len" => arg.and_then(|a| a.parse().ok()).map(LineInput::Length),
        "share" => Some(LineInput::Share),
        "help" | "?" => Some(LineInput::Help),
        "quit" | "q" | "exit" => Some(LineInput::Quit),
        _ => None,
    };

    parsed.unwrap_or_else(|| LineInput::Invalid(line.to_string()))
}

fn print_help() {
    println!("\nType a word and press Enter to guess. Commands:");
    println!("  :hint person|episode   reveal who said it or where (costs a hint)");
    println!("  :skip                  new puzzle without losing the streak (costs a skip)");
    println!("  :giveup                forfeit; resets streak, hints and skips");
    println!("  :new                   start another puzzle");
    println!("  :hard on|off           hard mode (resets streak)");
    println!("  :unlimited on|off      unlimited skips (resets streak)");
    println!("  :length N              max word length for the next puzzle");
    println!("  :share                 show the result of a finished puzzle");
    println!("  :quit                  exit\n");
}

fn flush_notices<S: Store>(session: &mut Session<S>) {
    for notice in session.take_notices() {
        print_notice(&notice);
    }
}

/// Type `word` into the session and submit it
fn submit_word<S: Store>(session: &mut Session<S>, word: &str) -> bool {
    let expected = session.solution().len();
    let letters: Vec<Key> = word.chars().filter_map(Key::from_char).collect();

    if letters.len() != word.chars().count() {
        println!("  {} Letters only, please.", "✗".red().bold());
        return false;
    }
    if letters.len() > expected {
        println!(
            "  {} The word has {expected} letters.",
            "✗".red().bold()
        );
        return false;
    }

    while !session.current_guess().is_empty() {
        let _ = session.submit_key(Key::Backspace);
    }
    for key in letters {
        let _ = session.submit_key(key);
    }

    match session.submit_key(Key::Enter) {
        Ok(KeyOutcome::Submitted { .. }) => {
            session.finish_reveal();
            true
        }
        // The rejection is queued as a notice
        Ok(_) | Err(_) => false,
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple<S: Store>(session: &mut Session<S>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Quotle - Line Mode                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!("\nGuess the hidden word in the quote. Type :help for commands.");

    print_board(session);
    flush_notices(session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let prompt = if session.status().is_over() {
            "Press Enter for a new puzzle"
        } else {
            "Guess"
        };
        print!("\n{prompt}: ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            println!();
            return Ok(());
        };

        let mut redraw = true;
        match parse_input(&line) {
            LineInput::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            LineInput::Continue => {
                if session.status().is_over() {
                    session.new_puzzle();
                } else {
                    redraw = false;
                }
            }
            LineInput::Guess(word) => {
                if session.status().is_over() {
                    println!("  This puzzle is over. Press Enter or type :new.");
                    redraw = false;
                } else {
                    redraw = submit_word(session, &word);
                }
            }
            LineInput::Hint(kind) => match session.use_hint(kind) {
                Ok(HintOutcome::Revealed(value)) => {
                    println!("  {} {}", "Hint:".bright_cyan().bold(), value);
                }
                Ok(HintOutcome::Ignored) | Err(_) => redraw = false,
            },
            LineInput::Skip => {
                if let Ok(SkipOutcome::Ignored) | Err(_) = session.use_skip() {
                    redraw = false;
                }
            }
            LineInput::GiveUp => {
                redraw = session.give_up();
            }
            LineInput::New => session.new_puzzle(),
            LineInput::Hard(enabled) => {
                session.change_setting(Setting::HardMode(enabled));
                redraw = false;
            }
            LineInput::Unlimited(enabled) => {
                session.change_setting(Setting::UnlimitedSkips(enabled));
                redraw = false;
            }
            LineInput::Length(length) => {
                session.change_setting(Setting::MaxWordLength(length));
                println!(
                    "  Max word length set to {} from the next puzzle.",
                    session.settings().max_word_length
                );
                redraw = false;
            }
            LineInput::Share => {
                match session.share_text() {
                    Some(text) => println!("\n{text}\n"),
                    None => println!("  Finish the puzzle first."),
                }
                println!("  {}", share_link(SHARE_BASE, &session.puzzle().quote().id));
                redraw = false;
            }
            LineInput::Help => {
                print_help();
                redraw = false;
            }
            LineInput::Invalid(input) => {
                println!("  {} Unknown command: {input}", "✗".red().bold());
                redraw = false;
            }
        }

        if redraw {
            print_board(session);
            if session.status() != GameStatus::Playing {
                print_outcome(session);
            }
        }
        flush_notices(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_guesses_and_blank_lines() {
        assert_eq!(parse_input("  chance \n"), LineInput::Guess("chance".to_string()));
        assert_eq!(parse_input("   "), LineInput::Continue);
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_input(":hint person"), LineInput::Hint(HintKind::Person));
        assert_eq!(parse_input(":h E"), LineInput::Hint(HintKind::Episode));
        assert_eq!(parse_input(":skip"), LineInput::Skip);
        assert_eq!(parse_input(":giveup"), LineInput::GiveUp);
        assert_eq!(parse_input(":new"), LineInput::New);
        assert_eq!(parse_input(":hard on"), LineInput::Hard(true));
        assert_eq!(parse_input(":unlimited OFF"), LineInput::Unlimited(false));
        assert_eq!(parse_input(":length 12"), LineInput::Length(12));
        assert_eq!(parse_input(":share"), LineInput::Share);
        assert_eq!(parse_input(":q"), LineInput::Quit);
    }

    #[test]
    fn parse_rejects_malformed_commands() {
        assert_eq!(parse_input(":hint"), LineInput::Invalid(":hint".to_string()));
        assert_eq!(parse_input(":hard maybe"), LineInput::Invalid(":hard maybe".to_string()));
        assert_eq!(parse_input(":length lots"), LineInput::Invalid(":length lots".to_string()));
        assert_eq!(parse_input(":dance"), LineInput::Invalid(":dance".to_string()));
    }
}
