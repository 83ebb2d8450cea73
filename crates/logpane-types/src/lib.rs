//! Shared types for logpane
//!
//! This crate contains data structures used across multiple logpane crates.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Log severity level, totally ordered from least to most severe.
///
/// `Off` sorts above everything and is a legal filter threshold (it hides
/// every record), but records themselves are never written at `Off`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl LogLevel {
    /// All levels in ascending severity order.
    pub const ALL: [LogLevel; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Off,
    ];

    /// Parse a level from common textual spellings.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" | "trc" | "trce" => Some(Self::Trace),
            "debug" | "dbg" | "debg" => Some(Self::Debug),
            "info" | "inf" | "information" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" | "erro" => Some(Self::Error),
            "fatal" | "panic" | "critical" | "crit" | "ftl" => Some(Self::Fatal),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    /// Map a raw ordinal (as produced by a severity selector widget)
    /// back to a level. Returns `None` outside `0..=6`.
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    /// Ordinal of this level within [`LogLevel::ALL`].
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Short display string (3 chars)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRC",
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Warn => "WRN",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
            Self::Off => "OFF",
        }
    }

    /// Full display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warn => "Warn",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
            Self::Off => "Off",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single log record.
///
/// Records are immutable values: the display line is rendered once at
/// construction and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Capture time
    pub timestamp: DateTime<Utc>,

    /// Severity of this record
    pub level: LogLevel,

    /// Raw message text
    pub message: String,

    /// Pre-rendered display line
    pub formatted: String,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::with_timestamp(Utc::now(), level, message)
    }

    /// Create a record with an explicit timestamp.
    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let formatted = format!(
            "{} {} {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level.as_str(),
            message
        );
        Self {
            timestamp,
            level,
            message,
            formatted,
        }
    }
}

/// Counts per log level
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub trace: usize,
    pub debug: usize,
    pub info: usize,
    pub warn: usize,
    pub error: usize,
    pub fatal: usize,
}

impl LevelCounts {
    /// Tally one record of the given level.
    pub fn record(&mut self, level: LogLevel) {
        match level {
            LogLevel::Trace => self.trace += 1,
            LogLevel::Debug => self.debug += 1,
            LogLevel::Info => self.info += 1,
            LogLevel::Warn => self.warn += 1,
            LogLevel::Error => self.error += 1,
            LogLevel::Fatal => self.fatal += 1,
            LogLevel::Off => {}
        }
    }

    pub fn total(&self) -> usize {
        self.trace + self.debug + self.info + self.warn + self.error + self.fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_total_order() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Off);
    }

    #[test]
    fn test_level_from_name() {
        assert_eq!(LogLevel::from_name("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_name("critical"), Some(LogLevel::Fatal));
        assert_eq!(LogLevel::from_name("verbose"), None);
    }

    #[test]
    fn test_level_index_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_index(level.index()), Some(level));
        }
        assert_eq!(LogLevel::from_index(7), None);
    }

    #[test]
    fn test_record_formatted_line() {
        let record = LogRecord::new(LogLevel::Error, "disk full");
        assert!(record.formatted.contains("ERR"));
        assert!(record.formatted.ends_with("disk full"));
    }

    #[test]
    fn test_level_counts() {
        let mut counts = LevelCounts::default();
        counts.record(LogLevel::Info);
        counts.record(LogLevel::Info);
        counts.record(LogLevel::Error);
        assert_eq!(counts.info, 2);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.total(), 3);
    }
}
