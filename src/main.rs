//! Quotle - CLI
//!
//! Quote-based word guessing game with TUI and line modes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use quotle::{
    commands::{check_guess, run_coverage, run_simple},
    corpus::{CorpusLoader, CorpusSource, WordSelector},
    game::{
        JsonFileStore, MemoryStore, Profile, Session, Store,
        share::parse_puzzle_link,
    },
    output::{print_check_result, print_coverage_report, print_profile},
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "quotle.log";

#[derive(Parser)]
#[command(
    name = "quotle",
    about = "Guess the hidden word in a quote, Wordle style",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quote corpus JSON file (default: bundled quotes)
    #[arg(short, long, global = true)]
    corpus: Option<PathBuf>,

    /// Profile file holding streaks, tokens and settings
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long, global = true)]
    no_save: bool,

    /// Start on a shared puzzle: an id or a link containing `puzzle=<id>`
    #[arg(long, global = true)]
    puzzle: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode without TUI
    Simple,

    /// Score one guess against a solution
    Check {
        /// The guessed word
        guess: String,

        /// The solution word
        solution: String,
    },

    /// Show streaks, tokens and settings
    Stats,

    /// Count playable quotes and words for every max word length
    Coverage {
        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Log file for TUI mode: next to the profile, none when nothing is saved
fn log_path(profile: Option<&Path>, no_save: bool) -> Option<PathBuf> {
    if no_save {
        return None;
    }
    let profile = profile.map_or_else(JsonFileStore::default_path, Path::to_path_buf);
    let dir = profile
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Some(dir.join(LOG_FILE))
}

/// Install the tracing subscriber
///
/// `RUST_LOG` selects the level (default `warn`). The TUI owns the terminal,
/// so in that mode logs go to `log_file` or nowhere.
fn init_logging(tui: bool, log_file: Option<PathBuf>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !tui {
        builder.with_writer(std::io::stderr).init();
        return;
    }

    let file = log_file.and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        File::create(path).ok()
    });
    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        // Stay silent rather than draw over the TUI
        None => builder.with_writer(std::io::sink).init(),
    }
}

fn open_store(cli: &Cli) -> Box<dyn Store> {
    if cli.no_save {
        return Box::new(MemoryStore::default());
    }
    let path = cli.profile.clone().unwrap_or_else(JsonFileStore::default_path);
    Box::new(JsonFileStore::open(path))
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    init_logging(
        matches!(command, Commands::Play),
        log_path(cli.profile.as_deref(), cli.no_save),
    );

    match command {
        Commands::Check { guess, solution } => {
            let result = check_guess(&guess, &solution)?;
            print_check_result(&result);
            Ok(())
        }
        Commands::Stats => {
            let store = open_store(&cli);
            print_profile(&Profile::load(&store));
            Ok(())
        }
        Commands::Coverage { quiet } => {
            let Some(selector) = load_selector(&cli) else {
                return Ok(());
            };
            let report = run_coverage(&selector, !quiet);
            print_coverage_report(&report);
            Ok(())
        }
        Commands::Simple => {
            let Some(mut session) = start_session(&cli) else {
                return Ok(());
            };
            run_simple(&mut session)
        }
        Commands::Play => {
            use quotle::interactive::{App, run_tui};

            let Some(session) = start_session(&cli) else {
                return Ok(());
            };
            run_tui(App::new(session))
        }
    }
}

/// Load the corpus, reporting a failure as a notice rather than an error
fn load_selector(cli: &Cli) -> Option<WordSelector> {
    let source = cli
        .corpus
        .clone()
        .map_or(CorpusSource::Embedded, CorpusSource::File);
    let loader = CorpusLoader::new(source);

    match loader.load() {
        Ok(corpus) => {
            info!(source = ?loader.source(), quotes = corpus.len(), "corpus ready");
            Some(WordSelector::new(corpus))
        }
        Err(err) => {
            warn!(error = %err, "corpus unavailable");
            eprintln!("Quotes are unavailable right now: {err}");
            eprintln!("Check the corpus file and try again.");
            None
        }
    }
}

fn start_session(cli: &Cli) -> Option<Session<Box<dyn Store>>> {
    let selector = load_selector(cli)?;
    let store = open_store(cli);

    let session = match cli.puzzle.as_deref() {
        Some(link) => {
            // An unparseable link falls through to the invalid-link notice
            let id = parse_puzzle_link(link).unwrap_or_default();
            Session::from_link(selector, store, &id)
        }
        None => Session::new(selector, store),
    };

    Some(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_sits_next_to_profile() {
        let path = log_path(Some(Path::new("/tmp/quotle-test/me.json")), false);
        assert_eq!(path, Some(PathBuf::from("/tmp/quotle-test/quotle.log")));
    }

    #[test]
    fn bare_profile_name_logs_in_current_dir() {
        let path = log_path(Some(Path::new("me.json")), false);
        assert_eq!(path, Some(PathBuf::from("./quotle.log")));
    }

    #[test]
    fn default_profile_logs_in_data_dir() {
        let path = log_path(None, false).unwrap();
        assert_eq!(path.parent(), JsonFileStore::default_path().parent());
    }

    #[test]
    fn no_save_writes_no_log() {
        assert_eq!(log_path(Some(Path::new("/tmp/me.json")), true), None);
        assert_eq!(log_path(None, true), None);
    }
}
