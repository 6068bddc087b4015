//! Timestamp formatting utilities
//!
//! File output always uses absolute ISO 8601 for machine parseability;
//! console output may use the 12/24-hour clock variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for rendered log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Wall-clock time, 24-hour: `10:30:45`
    Clock24Hour,

    /// Wall-clock time, 12-hour: `10:30:45 AM`
    Clock12Hour,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Clock24Hour => datetime.format("%H:%M:%S").to_string(),
            TimestampFormat::Clock12Hour => datetime.format("%I:%M:%S %p").to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// The console clock format for a 12/24-hour preference.
    #[must_use]
    pub fn clock(use_12_hour: bool) -> Self {
        if use_12_hour {
            TimestampFormat::Clock12Hour
        } else {
            TimestampFormat::Clock24Hour
        }
    }
}
