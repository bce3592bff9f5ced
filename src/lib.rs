//! Quotle
//!
//! A word-guessing game played on quotes: one word of a quote is hidden and
//! the player has five guesses to find it, with Wordle-style feedback.
//!
//! # Quick Start
//!
//! ```rust
//! use quotle::core::{Feedback, Word};
//!
//! let guess = Word::new("boat").unwrap();
//! let solution = Word::new("goat").unwrap();
//!
//! let feedback = Feedback::calculate(&guess, &solution);
//! assert_eq!(feedback.to_emoji(), "⬛🟩🟩🟩");
//! ```
//!
//! A full game is driven through [`game::Session`]:
//!
//! ```rust
//! use quotle::corpus::{CorpusLoader, CorpusSource, WordSelector};
//! use quotle::game::{Key, MemoryStore, Session};
//!
//! let loader = CorpusLoader::new(CorpusSource::Embedded);
//! let selector = WordSelector::new(loader.load().unwrap());
//! let mut session = Session::new(selector, MemoryStore::default());
//!
//! session.submit_key(Key::Letter('q')).unwrap();
//! assert_eq!(session.current_guess(), "q");
//! ```

// Core domain types
pub mod core;

// Quote corpus and solution selection
pub mod corpus;

// Game session, progression and persistence
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
