//! Game session, progression and persistence

pub mod economy;
mod key;
pub mod session;
pub mod share;
pub mod store;

pub use economy::{Economy, Profile, Rewards, Settings, StatKey};
pub use key::Key;
pub use session::{
    GameStatus, Hint, HintKind, HintOutcome, Hints, KeyOutcome, Notice, REVEAL_DELAY_PER_LETTER,
    Rejection, Session, Setting, SkipOutcome,
};
pub use store::{JsonFileStore, MemoryStore, Store, StoreError};
