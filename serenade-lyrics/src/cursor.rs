//! Active-line resolution against the playback clock

use crate::parse::LyricEntry;

/// Resolve the active entry index for a playback time
///
/// Returns the last index `i` with `entries[i].time <= time`, so entries
/// sharing a timestamp resolve to the later parse-order line. `None` when
/// the table is empty or the time precedes the first entry. Pure and
/// idempotent, so seeking backward re-resolves correctly with no history.
pub fn resolve_active(entries: &[LyricEntry], time: f64) -> Option<usize> {
    let after = entries.partition_point(|e| e.time <= time);
    after.checked_sub(1)
}

/// Driver-side diffing state for the visible lyric line
///
/// The clock emits many updates per second while lines change every few
/// seconds; `advance` only reports an index when it differs from the last
/// emitted one, so the display is rewritten exactly once per line change.
#[derive(Debug, Clone, Copy, Default)]
pub struct LyricCursor {
    current: Option<usize>,
}

impl LyricCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index last emitted to the display, if any
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Re-resolve against `time`; `Some` only when the active index changed
    ///
    /// A time before the first entry resolves to nothing and leaves the
    /// previously displayed line in place.
    pub fn advance(&mut self, entries: &[LyricEntry], time: f64) -> Option<usize> {
        let resolved = resolve_active(entries, time)?;
        if self.current == Some(resolved) {
            return None;
        }
        self.current = Some(resolved);
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_lrc;

    fn table() -> Vec<LyricEntry> {
        parse_lrc("[00:10]one\n[00:20]two\n[00:30]three")
    }

    #[test]
    fn test_resolve_before_first_is_none() {
        assert_eq!(resolve_active(&table(), 0.0), None);
        assert_eq!(resolve_active(&table(), 9.99), None);
    }

    #[test]
    fn test_resolve_windows() {
        let entries = table();
        assert_eq!(resolve_active(&entries, 10.0), Some(0));
        assert_eq!(resolve_active(&entries, 19.99), Some(0));
        assert_eq!(resolve_active(&entries, 20.0), Some(1));
    }

    #[test]
    fn test_resolve_at_or_after_last_is_last() {
        let entries = table();
        assert_eq!(resolve_active(&entries, 30.0), Some(2));
        assert_eq!(resolve_active(&entries, 1000.0), Some(2));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let entries = table();
        for t in [0.0, 10.0, 15.0, 25.0, 99.0] {
            assert_eq!(resolve_active(&entries, t), resolve_active(&entries, t));
        }
    }

    #[test]
    fn test_resolve_empty_table() {
        assert_eq!(resolve_active(&[], 42.0), None);
    }

    #[test]
    fn test_resolve_duplicate_timestamp_last_wins() {
        let entries = parse_lrc("[00:10]first\n[00:10]second");
        assert_eq!(resolve_active(&entries, 10.0), Some(1));
    }

    #[test]
    fn test_cursor_emits_only_on_change() {
        let entries = table();
        let mut cursor = LyricCursor::new();

        assert_eq!(cursor.advance(&entries, 5.0), None);
        assert_eq!(cursor.advance(&entries, 10.0), Some(0));
        assert_eq!(cursor.advance(&entries, 11.0), None);
        assert_eq!(cursor.advance(&entries, 12.0), None);
        assert_eq!(cursor.advance(&entries, 20.5), Some(1));
        assert_eq!(cursor.current(), Some(1));
    }

    #[test]
    fn test_cursor_seek_backward() {
        let entries = table();
        let mut cursor = LyricCursor::new();

        assert_eq!(cursor.advance(&entries, 31.0), Some(2));
        // Seek back into the first line's window
        assert_eq!(cursor.advance(&entries, 12.0), Some(0));
        // Seek back before the first line: display keeps the old line
        assert_eq!(cursor.advance(&entries, 1.0), None);
        assert_eq!(cursor.current(), Some(0));
    }
}
