//! Timed lyrics for Serenade - LRC parsing, lookup, and bilingual lines
//!
//! Parses the `[m:ss.ff]content` timed-text format into a sorted table and
//! resolves the active line for a playback time.

mod cursor;
mod parse;
mod source;

pub use cursor::{resolve_active, LyricCursor};
pub use parse::{parse_lrc, BilingualLine, LyricEntry};
pub use source::{load_from, load_or_empty, LyricsError};
