use chrono::{DateTime, Utc};
use serde_json::Value;

use logpane_types::{LogLevel, LogRecord};

/// Classifier for raw log lines arriving without structure.
///
/// Lines fed from a pipe or file carry their severity in-band; this
/// parser recovers a level and an optional leading RFC 3339 timestamp so
/// the record lands in the store properly tagged. Unclassifiable lines
/// default to `Info`.
pub struct LineParser;

impl LineParser {
    /// Parse a raw line into a record.
    pub fn parse(raw: &str) -> LogRecord {
        let (timestamp, content) = Self::extract_timestamp(raw);

        let level = Self::extract_level_from_json(content)
            .or_else(|| Self::extract_level_from_text(content))
            .unwrap_or(LogLevel::Info);

        match timestamp {
            Some(ts) => LogRecord::with_timestamp(ts, level, content),
            None => LogRecord::new(level, content),
        }
    }

    /// Extract an RFC 3339 timestamp from the beginning of a line.
    fn extract_timestamp(raw: &str) -> (Option<DateTime<Utc>>, &str) {
        // Shortest accepted form: 2024-01-15T10:30:00Z (20 chars).
        if raw.len() >= 20 {
            let search_end = Self::floor_char_boundary(raw, 35.min(raw.len()));
            if let Some(z_pos) = raw.get(..search_end).and_then(|s| s.find('Z')) {
                let ts_str = &raw[..=z_pos];
                if let Ok(ts) = DateTime::parse_from_rfc3339(ts_str) {
                    let remaining = raw[z_pos + 1..].trim_start();
                    return (Some(ts.with_timezone(&Utc)), remaining);
                }
            }
        }
        (None, raw)
    }

    /// Find the largest valid char boundary <= the given byte index
    fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
        if idx >= s.len() {
            return s.len();
        }
        while idx > 0 && !s.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    /// Pull a severity out of a JSON log line's level-like field.
    fn extract_level_from_json(content: &str) -> Option<LogLevel> {
        let trimmed = content.trim();
        if !trimmed.starts_with('{') {
            return None;
        }

        let value: Value = serde_json::from_str(trimmed).ok()?;
        let obj = value.as_object()?;

        let level_fields = ["level", "lvl", "severity", "log.level", "loglevel", "log_level"];
        for field in level_fields {
            if let Some(Value::String(s)) = obj.get(field) {
                if let Some(level) = LogLevel::from_name(s) {
                    return Some(level);
                }
            }
        }
        None
    }

    /// Detect a severity tag in plain text.
    fn extract_level_from_text(content: &str) -> Option<LogLevel> {
        let upper = content.to_uppercase();

        // Bracketed tags win: [ERROR], [WARN], ...
        let bracket_patterns = [
            ("[FATAL]", LogLevel::Fatal),
            ("[PANIC]", LogLevel::Fatal),
            ("[CRITICAL]", LogLevel::Fatal),
            ("[ERROR]", LogLevel::Error),
            ("[ERR]", LogLevel::Error),
            ("[WARN]", LogLevel::Warn),
            ("[WARNING]", LogLevel::Warn),
            ("[INFO]", LogLevel::Info),
            ("[DEBUG]", LogLevel::Debug),
            ("[TRACE]", LogLevel::Trace),
        ];
        for (pattern, level) in bracket_patterns {
            if upper.contains(pattern) {
                return Some(level);
            }
        }

        // Colon tags: ERROR:, WARN:, ...
        let colon_patterns = [
            ("FATAL:", LogLevel::Fatal),
            ("PANIC:", LogLevel::Fatal),
            ("ERROR:", LogLevel::Error),
            ("ERR:", LogLevel::Error),
            ("WARNING:", LogLevel::Warn),
            ("WARN:", LogLevel::Warn),
            ("INFO:", LogLevel::Info),
            ("DEBUG:", LogLevel::Debug),
            ("TRACE:", LogLevel::Trace),
        ];
        for (pattern, level) in colon_patterns {
            if upper.contains(pattern) {
                return Some(level);
            }
        }

        // Bare tag at the start of the line.
        let first = upper.trim_start().split_whitespace().next()?;
        LogLevel::from_name(first)
    }
}
