//! Progression and economy counters
//!
//! Win streak, personal best, hint and skip tokens, games won and user
//! preferences. Each value is persisted under its own key and survives across
//! sessions.

use super::store::Store;
use crate::core::{DEFAULT_MAX_WORD_LENGTH, MAX_CONFIGURABLE_WORD_LENGTH, MIN_WORD_LENGTH};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Skip tokens a new player starts with
pub const INITIAL_SKIPS: u32 = 3;

/// Hint tokens a new player starts with
pub const INITIAL_HINT_TOKENS: u32 = 2;

/// Skip tokens are only awarded while below this count
pub const SKIP_CAP: u32 = 5;

/// A hint token is awarded every this many wins
pub const HINT_REWARD_INTERVAL: u32 = 2;

/// A skip token is awarded every this many wins (outside unlimited mode)
pub const SKIP_REWARD_INTERVAL: u32 = 4;

/// Names of the persisted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    WinStreak,
    PersonalBest,
    Skips,
    HintTokens,
    MaxWordLength,
    GamesWon,
    IsUnlimitedMode,
    IsHardMode,
    IsDarkMode,
}

impl StatKey {
    pub const ALL: [Self; 9] = [
        Self::WinStreak,
        Self::PersonalBest,
        Self::Skips,
        Self::HintTokens,
        Self::MaxWordLength,
        Self::GamesWon,
        Self::IsUnlimitedMode,
        Self::IsHardMode,
        Self::IsDarkMode,
    ];

    /// Storage key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WinStreak => "winStreak",
            Self::PersonalBest => "personalBest",
            Self::Skips => "skips",
            Self::HintTokens => "hintTokens",
            Self::MaxWordLength => "maxWordLength",
            Self::GamesWon => "gamesWon",
            Self::IsUnlimitedMode => "isUnlimitedMode",
            Self::IsHardMode => "isHardMode",
            Self::IsDarkMode => "isDarkMode",
        }
    }
}

/// Durable counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub win_streak: u32,
    pub personal_best: u32,
    pub hint_tokens: u32,
    pub skip_tokens: u32,
    pub games_won: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            win_streak: 0,
            personal_best: 0,
            hint_tokens: INITIAL_HINT_TOKENS,
            skip_tokens: INITIAL_SKIPS,
            games_won: 0,
        }
    }
}

/// Tokens granted by a win
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rewards {
    pub hint: bool,
    pub skip: bool,
}

impl Economy {
    /// Apply a win and return the tokens it earned
    ///
    /// Hints are earned every second win in every mode. Skips are earned
    /// every fourth win, only outside unlimited-skip mode and only while
    /// below `SKIP_CAP`.
    pub fn record_win(&mut self, unlimited_skips: bool) -> Rewards {
        self.win_streak = self.win_streak.saturating_add(1);
        self.personal_best = self.personal_best.max(self.win_streak);
        self.games_won = self.games_won.saturating_add(1);

        let mut rewards = Rewards::default();

        if !unlimited_skips
            && self.games_won % SKIP_REWARD_INTERVAL == 0
            && self.skip_tokens < SKIP_CAP
        {
            self.skip_tokens = (self.skip_tokens + 1).min(SKIP_CAP);
            rewards.skip = true;
        }

        if self.games_won % HINT_REWARD_INTERVAL == 0 {
            self.hint_tokens = self.hint_tokens.saturating_add(1);
            rewards.hint = true;
        }

        rewards
    }

    /// Apply a loss by running out of guesses
    pub fn record_loss(&mut self) {
        self.win_streak = 0;
    }

    /// Apply a forfeit: streak and both token pools go back to their defaults
    pub fn forfeit(&mut self) {
        self.win_streak = 0;
        self.skip_tokens = INITIAL_SKIPS;
        self.hint_tokens = INITIAL_HINT_TOKENS;
    }

    /// Spend a hint token if one is available
    pub fn spend_hint(&mut self) -> bool {
        if self.hint_tokens == 0 {
            return false;
        }
        self.hint_tokens -= 1;
        true
    }

    /// Spend a skip token if one is available
    pub fn spend_skip(&mut self) -> bool {
        if self.skip_tokens == 0 {
            return false;
        }
        self.skip_tokens -= 1;
        true
    }
}

/// User preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_word_length: usize,
    pub hard_mode: bool,
    pub unlimited_skips: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            hard_mode: false,
            unlimited_skips: false,
            dark_mode: true,
        }
    }
}

/// Clamp a max word length setting into its accepted range
#[must_use]
pub fn clamp_word_length(length: usize) -> usize {
    length.clamp(MIN_WORD_LENGTH, MAX_CONFIGURABLE_WORD_LENGTH)
}

/// Everything persisted for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Profile {
    pub economy: Economy,
    pub settings: Settings,
}

impl Profile {
    /// Read every value from `store`
    ///
    /// Each key is read independently; a missing, corrupt or unreadable
    /// value falls back to its default without affecting the others.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let economy = Economy {
            win_streak: read(store, StatKey::WinStreak, defaults.economy.win_streak),
            personal_best: read(store, StatKey::PersonalBest, defaults.economy.personal_best),
            hint_tokens: read(store, StatKey::HintTokens, defaults.economy.hint_tokens),
            skip_tokens: read(store, StatKey::Skips, defaults.economy.skip_tokens),
            games_won: read(store, StatKey::GamesWon, defaults.economy.games_won),
        };

        let settings = Settings {
            max_word_length: clamp_word_length(read(
                store,
                StatKey::MaxWordLength,
                defaults.settings.max_word_length,
            )),
            hard_mode: read(store, StatKey::IsHardMode, defaults.settings.hard_mode),
            unlimited_skips: read(
                store,
                StatKey::IsUnlimitedMode,
                defaults.settings.unlimited_skips,
            ),
            dark_mode: read(store, StatKey::IsDarkMode, defaults.settings.dark_mode),
        };

        Self { economy, settings }
    }

    /// Write the given keys to `store`
    ///
    /// Failures are logged; the in-memory profile stays authoritative.
    pub fn persist<S: Store + ?Sized>(&self, store: &mut S, keys: &[StatKey]) {
        for &key in keys {
            let result = match key {
                StatKey::WinStreak => write(store, key, self.economy.win_streak),
                StatKey::PersonalBest => write(store, key, self.economy.personal_best),
                StatKey::Skips => write(store, key, self.economy.skip_tokens),
                StatKey::HintTokens => write(store, key, self.economy.hint_tokens),
                StatKey::GamesWon => write(store, key, self.economy.games_won),
                StatKey::MaxWordLength => write(store, key, self.settings.max_word_length),
                StatKey::IsUnlimitedMode => write(store, key, self.settings.unlimited_skips),
                StatKey::IsHardMode => write(store, key, self.settings.hard_mode),
                StatKey::IsDarkMode => write(store, key, self.settings.dark_mode),
            };

            if let Err(err) = result {
                warn!(key = key.as_str(), error = %err, "failed to persist value");
            }
        }
    }
}

fn read<S, T>(store: &S, key: StatKey, default: T) -> T
where
    S: Store + ?Sized,
    T: DeserializeOwned,
{
    match store.load(key.as_str()) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.as_str(), error = %err, "corrupt stored value, using default");
                default
            }
        },
        Ok(None) => {
            debug!(key = key.as_str(), "no stored value, using default");
            default
        }
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "could not read stored value, using default");
            default
        }
    }
}

fn write<S, T>(store: &mut S, key: StatKey, value: T) -> Result<(), super::store::StoreError>
where
    S: Store + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(&value)?;
    store.save(key.as_str(), &raw)
}
