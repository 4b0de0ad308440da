//! Best-effort lyric file loading
//!
//! A missing or unreadable lyric file leaves the display blank; it is never
//! an error surfaced to the card.

use crate::parse::{parse_lrc, LyricEntry};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a lyric file
#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and parse a lyric file
pub fn load_from(path: &Path) -> Result<Vec<LyricEntry>, LyricsError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_lrc(&text))
}

/// Read a lyric file, logging a warning and returning an empty table on failure
pub fn load_or_empty(path: &Path) -> Vec<LyricEntry> {
    match load_from(path) {
        Ok(entries) => {
            if entries.is_empty() {
                tracing::warn!("no usable lyric lines in {}", path.display());
            }
            entries
        }
        Err(e) => {
            tracing::warn!("failed to load lyrics from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let entries = load_or_empty(Path::new("/nonexistent/missing.lrc"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        assert!(load_from(Path::new("/nonexistent/missing.lrc")).is_err());
    }
}
