//! TUI application state and logic

use crate::core::{MAX_CONFIGURABLE_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::game::share::{SHARE_BASE, share_link};
use crate::game::{
    GameStatus, HintKind, HintOutcome, Key, Notice, Session, Setting, SkipOutcome, Store,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// How often the screen is redrawn while no key is pressed
const TICK: Duration = Duration::from_millis(40);

/// Messages kept in the message panel
const MAX_MESSAGES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App<S: Store> {
    pub session: Session<S>,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    pub show_share: bool,
}

impl<S: Store> App<S> {
    #[must_use]
    pub fn new(session: Session<S>) -> Self {
        let mut app = Self {
            session,
            messages: Vec::new(),
            should_quit: false,
            show_share: false,
        };
        app.add_message(
            "Guess the missing word. 1/2 hints, 4 skip, Ctrl-N new puzzle.",
            MessageStyle::Info,
        );
        app.drain_notices();
        app
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    fn drain_notices(&mut self) {
        for notice in self.session.take_notices() {
            let style = match notice {
                _ if notice.is_error() => MessageStyle::Error,
                Notice::EarnedHint | Notice::EarnedSkip => MessageStyle::Success,
                _ => MessageStyle::Info,
            };
            self.add_message(&notice.to_string(), style);
        }
    }

    fn announce_outcome(&mut self) {
        match self.session.status() {
            GameStatus::Won => {
                let count = self.session.guesses().len();
                let celebration = match count {
                    1 => "🎯 First try! Extraordinary!".to_string(),
                    2 => "🔥 Two guesses! Magnificent!".to_string(),
                    _ => format!("🎉 Solved in {count} guesses!"),
                };
                self.add_message(&celebration, MessageStyle::Success);
                self.add_message("Enter for a new puzzle, 's' to share.", MessageStyle::Info);
            }
            GameStatus::Lost => {
                let solution = self.session.solution().text().to_uppercase();
                self.add_message(&format!("The word was {solution}."), MessageStyle::Error);
                self.add_message("Enter for a new puzzle, 's' to share.", MessageStyle::Info);
            }
            GameStatus::Playing => {}
        }
    }

    fn new_puzzle(&mut self) {
        self.show_share = false;
        self.session.new_puzzle();
    }

    /// Advance timed state: settles a finished reveal
    pub fn tick(&mut self, now: Instant) {
        if self.session.poll(now).is_some() {
            self.drain_notices();
            self.announce_outcome();
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let plain = key
            .modifiers
            .intersection(KeyModifiers::CONTROL | KeyModifiers::ALT)
            .is_empty();
        let finished = self.session.status().is_over();

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_puzzle(),
            KeyCode::Enter if finished => self.new_puzzle(),
            KeyCode::F(2) => {
                let enabled = !self.session.settings().hard_mode;
                self.session.change_setting(Setting::HardMode(enabled));
                self.add_message(
                    if enabled { "Hard mode on." } else { "Hard mode off." },
                    MessageStyle::Info,
                );
            }
            KeyCode::F(3) => {
                let enabled = !self.session.settings().unlimited_skips;
                self.session.change_setting(Setting::UnlimitedSkips(enabled));
                self.add_message(
                    if enabled {
                        "Unlimited skips on."
                    } else {
                        "Unlimited skips off."
                    },
                    MessageStyle::Info,
                );
            }
            KeyCode::F(4) => {
                let dark = !self.session.settings().dark_mode;
                self.session.change_setting(Setting::DarkMode(dark));
            }
            KeyCode::Char('+' | '=') => self.change_length(1),
            KeyCode::Char('-') => self.change_length(-1),
            KeyCode::Char('1') => self.hint(HintKind::Person),
            KeyCode::Char('2') => self.hint(HintKind::Episode),
            KeyCode::Char('3') => {
                if self.session.give_up() {
                    self.drain_notices();
                    self.announce_outcome();
                }
            }
            KeyCode::Char('4') => {
                if let Ok(SkipOutcome::Skipped { .. }) = self.session.use_skip() {
                    self.show_share = false;
                }
            }
            KeyCode::Char('s') if finished => self.show_share = !self.show_share,
            KeyCode::Char(c) if plain => {
                // Refusals are reported through notices
                if let Some(key) = Key::from_char(c) {
                    let _ = self.session.submit_key(key);
                }
            }
            KeyCode::Backspace => {
                let _ = self.session.submit_key(Key::Backspace);
            }
            KeyCode::Enter => {
                let _ = self.session.submit_key(Key::Enter);
            }
            _ => {}
        }

        self.drain_notices();
    }

    /// Result grid and puzzle link shown in the share popup
    #[must_use]
    pub fn share_popup_text(&self) -> Option<String> {
        let text = self.session.share_text()?;
        let link = share_link(SHARE_BASE, &self.session.puzzle().quote().id);
        Some(format!("{}\n\n{link}", text.trim_end()))
    }

    fn hint(&mut self, kind: HintKind) {
        if let Ok(HintOutcome::Revealed(value)) = self.session.use_hint(kind) {
            let label = match kind {
                HintKind::Person => "Said by",
                HintKind::Episode => "Episode",
            };
            self.add_message(&format!("{label}: {value}"), MessageStyle::Info);
        }
    }

    fn change_length(&mut self, delta: isize) {
        let current = self.session.settings().max_word_length;
        let target = current
            .saturating_add_signed(delta)
            .clamp(MIN_WORD_LENGTH, MAX_CONFIGURABLE_WORD_LENGTH);
        if target == current {
            return;
        }
        self.session.change_setting(Setting::MaxWordLength(target));
        self.add_message(
            &format!("Max word length {target} from the next puzzle."),
            MessageStyle::Info,
        );
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: Store>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: Store>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| super::rendering::ui(f, &app, now))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
        {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            debug!(code = ?key.code, "key");
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
