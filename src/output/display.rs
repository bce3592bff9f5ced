//! Display functions for command results

use super::formatters::{create_progress_bar, empty_row, feedback_row, keyboard};
use crate::commands::{CheckResult, CoverageReport};
use crate::core::MAX_GUESSES;
use crate::game::{GameStatus, Notice, Profile, Session, Store};
use colored::Colorize;

/// Print the result of checking one guess
pub fn print_check_result(result: &CheckResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Checking {} against {}",
        result.guess.text().to_uppercase().bright_white().bold(),
        result.solution.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    println!("\n  {}", feedback_row(&result.guess, &result.feedback));
    println!("  {}\n", result.feedback.to_emoji());

    if result.is_solved() {
        println!("{}", "✅ Exact match!".green().bold());
    } else {
        println!(
            "{} correct, {} present",
            result.feedback.count_correct().to_string().green().bold(),
            result.feedback.count_present().to_string().yellow().bold()
        );
    }
}

/// Print the masked quote, the guess grid and the keyboard
pub fn print_board<S: Store>(session: &Session<S>) {
    let puzzle = session.puzzle();
    let quote = puzzle.quote();
    let solution_len = session.solution().len();

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " Streak {}  Best {}  Hints {}  Skips {}",
        session.economy().win_streak.to_string().bright_yellow().bold(),
        session.economy().personal_best.to_string().bright_yellow(),
        session.economy().hint_tokens,
        if session.settings().unlimited_skips {
            "∞".to_string()
        } else {
            session.economy().skip_tokens.to_string()
        }
    );
    println!("{}", "═".repeat(60).cyan());

    let text = if session.status().is_over() {
        quote.text.clone()
    } else {
        session.masked_text()
    };
    println!("\n  “{}”", text.italic());

    let hints = session.hints();
    if hints.person.revealed || session.status().is_over() {
        println!("     {} {}", "said by".bright_black(), hints.person.value.bright_cyan());
    }
    if hints.episode.revealed || session.status().is_over() {
        println!("     {} {}", "in".bright_black(), hints.episode.value.bright_cyan());
    }
    println!();

    for (guess, feedback) in session.guesses().iter().zip(session.feedback()) {
        println!("  {}", feedback_row(guess, &feedback));
    }
    for _ in session.guesses().len()..MAX_GUESSES {
        println!("  {}", empty_row(solution_len));
    }

    println!();
    for row in keyboard(&session.letter_statuses()) {
        println!("  {row}");
    }

    let mut modes = Vec::new();
    if session.settings().hard_mode {
        modes.push("hard");
    }
    if session.settings().unlimited_skips {
        modes.push("unlimited skips");
    }
    println!(
        "\n  {} letters (max {}){}",
        solution_len,
        session.settings().max_word_length,
        if modes.is_empty() {
            String::new()
        } else {
            format!(" | {}", modes.join(", "))
        }
    );
}

/// Print the end-of-game banner
pub fn print_outcome<S: Store>(session: &Session<S>) {
    let solution = session.solution().text().to_uppercase();
    match session.status() {
        GameStatus::Won => {
            let guesses = session.guesses().len();
            println!("\n{}", "═".repeat(60).bright_cyan());
            println!(
                "  {} Solved in {} {}!",
                "🎉".bright_green(),
                guesses.to_string().bright_cyan().bold(),
                if guesses == 1 { "guess" } else { "guesses" }
            );
            println!("{}", "═".repeat(60).bright_cyan());
        }
        GameStatus::Lost => {
            println!("\n{}", "═".repeat(60).red());
            println!("  The word was {}", solution.bright_yellow().bold());
            println!("{}", "═".repeat(60).red());
        }
        GameStatus::Playing => {}
    }
}

/// Print a queued session message
pub fn print_notice(notice: &Notice) {
    if notice.is_error() {
        println!("  {} {}", "✗".red().bold(), notice.to_string().red());
    } else {
        println!("  {} {}", "•".bright_cyan(), notice.to_string().bright_white());
    }
}

/// Print the persisted profile
pub fn print_profile(profile: &Profile) {
    let economy = &profile.economy;
    let settings = &profile.settings;

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "PLAYER STATS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Progress:".bright_cyan().bold());
    println!(
        "   Win streak:       {}",
        economy.win_streak.to_string().bright_yellow().bold()
    );
    println!("   Personal best:    {}", economy.personal_best.to_string().green());
    println!("   Games won:        {}", economy.games_won);
    println!("   Hint tokens:      {}", economy.hint_tokens);
    println!("   Skip tokens:      {}", economy.skip_tokens);

    let on_off = |enabled: bool| if enabled { "on".green() } else { "off".bright_black() };
    println!("\n⚙️  {}", "Settings:".bright_cyan().bold());
    println!("   Max word length:  {}", settings.max_word_length);
    println!("   Hard mode:        {}", on_off(settings.hard_mode));
    println!("   Unlimited skips:  {}", on_off(settings.unlimited_skips));
    println!("   Dark theme:       {}", on_off(settings.dark_mode));
}

/// Print the corpus coverage table
pub fn print_coverage_report(report: &CoverageReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "CORPUS COVERAGE".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n   {} quotes scanned in {:.2}s\n",
        report.total_quotes,
        report.duration.as_secs_f64()
    );
    println!("   max  quotes  words  distinct");

    let total = report.total_quotes as f64;
    for row in &report.rows {
        let bar = create_progress_bar(row.eligible_quotes as f64, total, 24);
        let line = format!(
            "   {:>3}  {:>6}  {:>5}  {:>8}  {}",
            row.max_length, row.eligible_quotes, row.guessable_words, row.distinct_words, bar
        );
        if row.eligible_quotes == 0 {
            println!("{}", line.bright_black());
        } else {
            println!("{line}");
        }
    }
}
