//! Game session state machine
//!
//! Owns the active puzzle, the guess history, the in-progress guess and the
//! player profile, and applies every transition: key input, guess
//! submission, the timed reveal, win/loss detection, hints, skips, forfeits
//! and setting changes.
//!
//! Front ends call the operations below and render from the accessors. User
//! facing messages are queued as [`Notice`]s and drained with
//! [`Session::take_notices`].

use super::economy::{Economy, Profile, Settings, StatKey, clamp_word_length};
use super::key::Key;
use super::share;
use super::store::Store;
use crate::core::{
    Feedback, HardModeViolation, LetterStatuses, MAX_GUESSES, Word, hard_mode,
};
use crate::corpus::{Puzzle, QuoteRecord, SelectError, WordSelector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Input lockout per letter while a submitted guess is revealed
pub const REVEAL_DELAY_PER_LETTER: Duration = Duration::from_millis(200);

/// Length of the reveal for a word of `letters` letters
#[must_use]
pub fn reveal_delay(letters: usize) -> Duration {
    REVEAL_DELAY_PER_LETTER.saturating_mul(u32::try_from(letters).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Person,
    Episode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub revealed: bool,
    pub value: String,
}

/// Attribution hints for the active puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hints {
    pub person: Hint,
    pub episode: Hint,
}

impl Hints {
    fn from_quote(quote: &QuoteRecord) -> Self {
        Self {
            person: Hint {
                revealed: false,
                value: quote.person.clone(),
            },
            episode: Hint {
                revealed: false,
                value: quote.episode.clone(),
            },
        }
    }

    #[must_use]
    pub const fn get(&self, kind: HintKind) -> &Hint {
        match kind {
            HintKind::Person => &self.person,
            HintKind::Episode => &self.episode,
        }
    }

    fn get_mut(&mut self, kind: HintKind) -> &mut Hint {
        match kind {
            HintKind::Person => &mut self.person,
            HintKind::Episode => &mut self.episode,
        }
    }
}

/// A user preference change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    HardMode(bool),
    UnlimitedSkips(bool),
    DarkMode(bool),
    MaxWordLength(usize),
}

/// A refused operation; nothing in the session changed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Not enough letters")]
    NotEnoughLetters,
    #[error(transparent)]
    HardMode(#[from] HardModeViolation),
    #[error("You're out of hints!")]
    OutOfHints,
    #[error("You're out of skips!")]
    OutOfSkips,
}

/// Message for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Rejected(Rejection),
    WordWas(String),
    EarnedSkip,
    EarnedHint,
    StreakReset,
    ProgressReset,
    InvalidPuzzleLink,
}

impl Notice {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::InvalidPuzzleLink)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::WordWas(word) => write!(f, "Word was: {}.", word.to_uppercase()),
            Self::EarnedSkip => write!(f, "You earned a skip!"),
            Self::EarnedHint => write!(f, "You earned a hint!"),
            Self::StreakReset => write!(f, "Settings changed. Streak reset!"),
            Self::ProgressReset => write!(f, "Streak, hints, and skips have been reset."),
            Self::InvalidPuzzleLink => write!(f, "Invalid puzzle link. Starting a random game."),
        }
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing happened (game over, reveal running, or guess full/empty)
    Ignored,
    Typed,
    Erased,
    /// The guess was accepted; outcome is settled after `reveal`
    Submitted { reveal: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    Ignored,
    Revealed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipOutcome {
    Ignored,
    Skipped { solution: Word },
}

/// A submitted guess whose outcome has not been applied yet
#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    started: Instant,
    ready_at: Instant,
}

/// One player's game session
pub struct Session<S: Store> {
    selector: WordSelector,
    store: S,
    profile: Profile,
    rng: StdRng,
    puzzle: Puzzle,
    guesses: Vec<Word>,
    current: String,
    status: GameStatus,
    hints: Hints,
    pending: Option<PendingReveal>,
    link: Option<String>,
    notices: Vec<Notice>,
}

impl<S: Store> Session<S> {
    /// Start a session on a random puzzle
    pub fn new(selector: WordSelector, store: S) -> Self {
        Self::with_rng(selector, store, StdRng::from_os_rng())
    }

    /// Start a session on a random puzzle drawn from `rng`
    pub fn with_rng(selector: WordSelector, store: S, rng: StdRng) -> Self {
        let mut session = Self::unstarted(selector, store, rng);
        session.new_puzzle();
        session
    }

    /// Start a session on the puzzle with this id
    ///
    /// Falls back to a random puzzle, with a notice, if the id cannot be used.
    pub fn from_link(selector: WordSelector, store: S, puzzle_id: &str) -> Self {
        let mut session = Self::unstarted(selector, store, StdRng::from_os_rng());
        // Failure is already reported through a notice
        let _ = session.load_by_id(puzzle_id);
        session
    }

    fn unstarted(selector: WordSelector, store: S, rng: StdRng) -> Self {
        let profile = Profile::load(&store);
        debug!(?profile, "profile loaded");
        let puzzle = Puzzle::fallback();
        let hints = Hints::from_quote(puzzle.quote());

        Self {
            selector,
            store,
            profile,
            rng,
            puzzle,
            guesses: Vec::new(),
            current: String::new(),
            status: GameStatus::Playing,
            hints,
            pending: None,
            link: None,
            notices: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Puzzle lifecycle
    // ---------------------------------------------------------------------

    /// Replace the puzzle with a random one using the configured max length
    ///
    /// Detaches the session from any shared puzzle link.
    pub fn new_puzzle(&mut self) {
        self.new_puzzle_with_max_length(self.profile.settings.max_word_length);
    }

    /// Replace the puzzle with a random one of at most `max_length` letters
    pub fn new_puzzle_with_max_length(&mut self, max_length: usize) {
        if let Some(id) = self.link.take() {
            debug!(id, "leaving shared puzzle");
        }
        let puzzle = self.selector.select_random(max_length, &mut self.rng);
        info!(id = %puzzle.quote().id, letters = puzzle.solution().len(), "new puzzle");
        self.install(puzzle);
    }

    /// Replace the puzzle with the one identified by `id`
    ///
    /// On failure a notice is queued and a random puzzle is started instead.
    ///
    /// # Errors
    ///
    /// Returns the `SelectError` that caused the fallback.
    pub fn load_by_id(&mut self, id: &str) -> Result<(), SelectError> {
        match self
            .selector
            .select_by_id(id, self.profile.settings.max_word_length)
        {
            Ok(puzzle) => {
                info!(id, letters = puzzle.solution().len(), "loaded shared puzzle");
                self.install(puzzle);
                self.link = Some(id.to_string());
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "invalid puzzle link, starting a random game");
                self.notices.push(Notice::InvalidPuzzleLink);
                self.new_puzzle();
                Err(err)
            }
        }
    }

    fn install(&mut self, puzzle: Puzzle) {
        if self.pending.take().is_some() {
            debug!("discarded pending reveal");
        }
        self.hints = Hints::from_quote(puzzle.quote());
        self.puzzle = puzzle;
        self.guesses.clear();
        self.current.clear();
        self.status = GameStatus::Playing;
    }

    // ---------------------------------------------------------------------
    // Input and guessing
    // ---------------------------------------------------------------------

    /// Apply a key press
    ///
    /// Ignored unless the game is in progress and no reveal is running.
    ///
    /// # Errors
    ///
    /// Returns a `Rejection` if Enter was pressed with an incomplete guess or
    /// a guess that breaks hard mode. The session is left unchanged.
    pub fn submit_key(&mut self, key: Key) -> Result<KeyOutcome, Rejection> {
        if self.status != GameStatus::Playing || self.pending.is_some() {
            return Ok(KeyOutcome::Ignored);
        }

        match key {
            Key::Letter(letter) => {
                if self.current.len() < self.puzzle.solution().len() && letter.is_ascii_alphabetic()
                {
                    self.current.push(letter.to_ascii_lowercase());
                    Ok(KeyOutcome::Typed)
                } else {
                    Ok(KeyOutcome::Ignored)
                }
            }
            Key::Backspace => Ok(if self.current.pop().is_some() {
                KeyOutcome::Erased
            } else {
                KeyOutcome::Ignored
            }),
            Key::Enter => self.submit_guess(Instant::now()),
        }
    }

    fn submit_guess(&mut self, now: Instant) -> Result<KeyOutcome, Rejection> {
        let solution = self.puzzle.solution();
        if self.current.len() != solution.len() {
            return Err(self.reject(Rejection::NotEnoughLetters));
        }

        let guess = Word::from_lowercase(&self.current);

        if self.profile.settings.hard_mode
            && let Some(previous) = self.guesses.last()
        {
            let feedback = Feedback::calculate(previous, solution);
            if let Err(violation) = hard_mode::validate(previous, &feedback, &guess) {
                debug!(guess = %guess, %violation, "hard mode violation");
                return Err(self.reject(violation.into()));
            }
        }

        let reveal = reveal_delay(solution.len());
        debug!(guess = %guess, attempt = self.guesses.len() + 1, "guess submitted");
        self.guesses.push(guess);
        self.current.clear();
        self.pending = Some(PendingReveal {
            started: now,
            ready_at: now + reveal,
        });

        Ok(KeyOutcome::Submitted { reveal })
    }

    /// Settle the pending reveal if its delay has elapsed at `now`
    ///
    /// Returns the status after settling, or `None` if nothing was settled.
    pub fn poll(&mut self, now: Instant) -> Option<GameStatus> {
        let ready = self.pending.is_some_and(|pending| now >= pending.ready_at);
        if ready { self.finish_reveal() } else { None }
    }

    /// Settle the pending reveal immediately
    ///
    /// Applies win/loss detection and the resulting progression changes.
    /// Returns `None` if no reveal was pending.
    pub fn finish_reveal(&mut self) -> Option<GameStatus> {
        self.pending.take()?;

        let won = self.guesses.last() == Some(self.puzzle.solution());
        if won {
            self.status = GameStatus::Won;
            let unlimited = self.profile.settings.unlimited_skips;
            let rewards = self.profile.economy.record_win(unlimited);

            let mut changed = vec![StatKey::WinStreak, StatKey::PersonalBest, StatKey::GamesWon];
            if rewards.skip {
                changed.push(StatKey::Skips);
                self.notices.push(Notice::EarnedSkip);
            }
            if rewards.hint {
                changed.push(StatKey::HintTokens);
                self.notices.push(Notice::EarnedHint);
            }
            self.persist(&changed);

            info!(
                guesses = self.guesses.len(),
                streak = self.profile.economy.win_streak,
                "puzzle solved"
            );
        } else if self.guesses.len() >= MAX_GUESSES {
            self.status = GameStatus::Lost;
            self.profile.economy.record_loss();
            self.persist(&[StatKey::WinStreak]);
            info!(solution = %self.puzzle.solution(), "out of guesses");
        }

        Some(self.status)
    }

    // ---------------------------------------------------------------------
    // Hints, skips and forfeits
    // ---------------------------------------------------------------------

    /// Reveal an attribution hint, spending one token
    ///
    /// # Errors
    ///
    /// Returns `Rejection::OutOfHints` if no tokens are left.
    pub fn use_hint(&mut self, kind: HintKind) -> Result<HintOutcome, Rejection> {
        if self.status != GameStatus::Playing || self.hints.get(kind).revealed {
            return Ok(HintOutcome::Ignored);
        }

        if !self.profile.economy.spend_hint() {
            return Err(self.reject(Rejection::OutOfHints));
        }
        self.persist(&[StatKey::HintTokens]);

        let hint = self.hints.get_mut(kind);
        hint.revealed = true;
        debug!(?kind, "hint revealed");
        Ok(HintOutcome::Revealed(hint.value.clone()))
    }

    /// Abandon the puzzle for a new one without affecting the streak
    ///
    /// Free in unlimited-skip mode, otherwise costs one skip token.
    ///
    /// # Errors
    ///
    /// Returns `Rejection::OutOfSkips` if a token is needed and none is left.
    pub fn use_skip(&mut self) -> Result<SkipOutcome, Rejection> {
        if self.status != GameStatus::Playing {
            return Ok(SkipOutcome::Ignored);
        }

        if !self.profile.settings.unlimited_skips {
            if !self.profile.economy.spend_skip() {
                return Err(self.reject(Rejection::OutOfSkips));
            }
            self.persist(&[StatKey::Skips]);
        }

        let solution = self.puzzle.solution().clone();
        info!(solution = %solution, "puzzle skipped");
        self.notices.push(Notice::WordWas(solution.text().to_string()));
        self.new_puzzle();
        Ok(SkipOutcome::Skipped { solution })
    }

    /// Forfeit the puzzle
    ///
    /// Harsher than running out of guesses: the streak and both token pools
    /// are reset. Returns `false` if there was nothing to forfeit.
    pub fn give_up(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.pending.is_some() {
            return false;
        }

        self.status = GameStatus::Lost;
        self.profile.economy.forfeit();
        self.persist(&[StatKey::WinStreak, StatKey::Skips, StatKey::HintTokens]);
        self.notices.push(Notice::ProgressReset);
        info!(solution = %self.puzzle.solution(), "puzzle forfeited");
        true
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    /// Change a preference
    ///
    /// Toggling hard mode or unlimited skips resets the win streak; returns
    /// `true` when that happened. A new max word length applies from the
    /// next puzzle.
    pub fn change_setting(&mut self, setting: Setting) -> bool {
        let settings = &mut self.profile.settings;
        match setting {
            Setting::HardMode(enabled) => {
                settings.hard_mode = enabled;
                self.persist(&[StatKey::IsHardMode]);
                self.reset_streak()
            }
            Setting::UnlimitedSkips(enabled) => {
                settings.unlimited_skips = enabled;
                self.persist(&[StatKey::IsUnlimitedMode]);
                self.reset_streak()
            }
            Setting::DarkMode(enabled) => {
                settings.dark_mode = enabled;
                self.persist(&[StatKey::IsDarkMode]);
                false
            }
            Setting::MaxWordLength(length) => {
                settings.max_word_length = clamp_word_length(length);
                self.persist(&[StatKey::MaxWordLength]);
                false
            }
        }
    }

    fn reset_streak(&mut self) -> bool {
        self.profile.economy.win_streak = 0;
        self.persist(&[StatKey::WinStreak]);
        self.notices.push(Notice::StreakReset);
        true
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        self.notices.push(Notice::Rejected(rejection.clone()));
        rejection
    }

    fn persist(&mut self, keys: &[StatKey]) {
        self.profile.persist(&mut self.store, keys);
    }

    // ---------------------------------------------------------------------
    // State for rendering
    // ---------------------------------------------------------------------

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn solution(&self) -> &Word {
        self.puzzle.solution()
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.current
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn hints(&self) -> &Hints {
        &self.hints
    }

    #[must_use]
    pub const fn economy(&self) -> &Economy {
        &self.profile.economy
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Id of the shared puzzle being played, if the puzzle came from a link
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Quote text with the solution masked
    #[must_use]
    pub fn masked_text(&self) -> String {
        self.puzzle.masked_text()
    }

    /// Feedback for every submitted guess, in order
    #[must_use]
    pub fn feedback(&self) -> Vec<Feedback> {
        let solution = self.puzzle.solution();
        self.guesses
            .iter()
            .map(|guess| Feedback::calculate(guess, solution))
            .collect()
    }

    /// Best-known state of every guessed letter
    #[must_use]
    pub fn letter_statuses(&self) -> LetterStatuses {
        LetterStatuses::from_guesses(&self.guesses, self.puzzle.solution())
    }

    /// Whether a submitted guess is still being revealed
    #[must_use]
    pub const fn is_revealing(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of letters of the newest guess revealed at `now`
    ///
    /// `None` when no reveal is running.
    #[must_use]
    pub fn reveal_progress(&self, now: Instant) -> Option<usize> {
        let pending = self.pending?;
        let elapsed = now.saturating_duration_since(pending.started);
        let letters = elapsed.as_millis() / REVEAL_DELAY_PER_LETTER.as_millis();
        let letters = usize::try_from(letters).unwrap_or(usize::MAX);
        Some(letters.min(self.puzzle.solution().len()))
    }

    /// Result summary for sharing, once the game is over
    #[must_use]
    pub fn share_text(&self) -> Option<String> {
        self.status.is_over().then(|| {
            share::share_text(
                &self.puzzle.quote().id,
                &self.guesses,
                self.puzzle.solution(),
                self.status == GameStatus::Won,
            )
        })
    }

    /// Drain queued messages
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
