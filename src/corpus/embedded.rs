//! Embedded corpus data
//!
//! The bundled quote corpus and the exclusion list compiled into the binary.

// Include generated exclusion list from build script
include!(concat!(env!("OUT_DIR"), "/excluded.rs"));

/// Bundled quote corpus in its JSON interchange format
pub const EMBEDDED_QUOTES: &str = include_str!("../../data/quotes.json");
