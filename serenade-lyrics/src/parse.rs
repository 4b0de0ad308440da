//! LRC timed-text parsing

/// A single timed lyric line
#[derive(Debug, Clone, PartialEq)]
pub struct LyricEntry {
    /// Timestamp in seconds from the start of the track
    pub time: f64,
    /// Raw line content (may contain a `||` bilingual separator)
    pub text: String,
}

/// A lyric line split into its two language halves
///
/// A missing half is an empty string, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BilingualLine {
    pub primary: String,
    pub secondary: String,
}

impl BilingualLine {
    /// Split entry text on the `||` separator, trimming both halves
    pub fn split(text: &str) -> Self {
        match text.split_once("||") {
            Some((primary, secondary)) => Self {
                primary: primary.trim().to_string(),
                secondary: secondary.trim().to_string(),
            },
            None => Self {
                primary: text.trim().to_string(),
                secondary: String::new(),
            },
        }
    }
}

/// Parse LRC text into entries sorted ascending by time
///
/// Each line is matched against `[m:ss(.ff)]content`. Lines without a valid
/// tag, or whose trimmed content is empty, are skipped silently. The sort is
/// stable, so lines sharing a timestamp keep their parse order.
pub fn parse_lrc(text: &str) -> Vec<LyricEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let Some((time, content)) = parse_timestamp_tag(line) else {
            continue;
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        entries.push(LyricEntry {
            time,
            text: content.to_string(),
        });
    }

    entries.sort_by(|a, b| a.time.total_cmp(&b.time));
    entries
}

/// Match the first valid `[m:ss(.ff)]` tag on a line
///
/// Bracketed tags that are not timestamps (`[chorus]`) are skipped, so a
/// timestamp appearing later in the line still counts.
fn parse_timestamp_tag(line: &str) -> Option<(f64, &str)> {
    let mut start = 0;
    while let Some(open) = line[start..].find('[') {
        let rest = &line[start + open + 1..];
        let close = rest.find(']')?;
        let (tag, content) = (&rest[..close], &rest[close + 1..]);

        if let Some(time) = parse_clock_tag(tag) {
            return Some((time, content));
        }
        start += open + 1;
    }
    None
}

/// Parse `m:ss(.ff)` clock digits
///
/// Minutes and whole seconds are 1-2 digit integers; the optional fraction
/// is 1-2 digits read as hundredths of a second.
fn parse_clock_tag(tag: &str) -> Option<f64> {
    let (minutes, seconds) = tag.split_once(':')?;
    let minutes = parse_clock_field(minutes)?;

    let (whole, hundredths) = match seconds.split_once('.') {
        Some((whole, frac)) => (parse_clock_field(whole)?, parse_clock_field(frac)?),
        None => (parse_clock_field(seconds)?, 0),
    };

    Some(minutes as f64 * 60.0 + whole as f64 + hundredths as f64 / 100.0)
}

/// Parse a 1-2 digit decimal field
fn parse_clock_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        let entries = parse_lrc("[01:02.50]Hello || 안녕");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, 62.5);

        let line = BilingualLine::split(&entries[0].text);
        assert_eq!(line.primary, "Hello");
        assert_eq!(line.secondary, "안녕");
    }

    #[test]
    fn test_parse_skips_invalid_lines() {
        let text = "not a tag\n[xx:yy]bad numbers\n[00:10]valid\n[0:5.3]\n[1:2]also valid";
        let entries = parse_lrc(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "valid");
        assert_eq!(entries[1].text, "also valid");
    }

    #[test]
    fn test_parse_skips_empty_content() {
        let entries = parse_lrc("[00:01]   \n[00:02]\n[00:03]kept");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "kept");
    }

    #[test]
    fn test_parse_sorts_by_time() {
        let text = "[01:00]second\n[00:30]first\n[02:00]third";
        let entries = parse_lrc(text);
        let times: Vec<f64> = entries.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![30.0, 60.0, 120.0]);
        assert!(entries.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_parse_duplicate_timestamps_keep_order() {
        let entries = parse_lrc("[00:10]one\n[00:10]two");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "one");
        assert_eq!(entries[1].text, "two");
    }

    #[test]
    fn test_parse_fraction_variants() {
        let entries = parse_lrc("[0:01]a\n[0:02.5]b\n[0:03.05]c");
        assert_eq!(entries[0].time, 1.0);
        assert_eq!(entries[1].time, 2.05);
        assert_eq!(entries[2].time, 3.05);
    }

    #[test]
    fn test_tag_after_non_timestamp_bracket() {
        let entries = parse_lrc("[chorus] [00:05]hi");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, 5.0);
        assert_eq!(entries[0].text, "hi");
    }

    #[test]
    fn test_line_of_only_non_timestamp_tags_is_skipped() {
        let entries = parse_lrc("[intro][verse] la la");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_crlf_input() {
        let entries = parse_lrc("[00:01]one\r\n[00:02]two\r\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "two");
    }

    #[test]
    fn test_bilingual_missing_half() {
        let line = BilingualLine::split("only english");
        assert_eq!(line.primary, "only english");
        assert_eq!(line.secondary, "");

        let line = BilingualLine::split("|| 한국어만");
        assert_eq!(line.primary, "");
        assert_eq!(line.secondary, "한국어만");
    }
}
