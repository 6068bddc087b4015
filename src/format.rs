//! Formatters rendering a log entry into a display string
//!
//! Every formatter serializes context through the [`Redactor`], which is the
//! shared redaction boundary for all transports:
//! - [`PrettyFormatter`]: multi-line console blocks with icon, level and
//!   timestamp header, message line, `key: value` context lines, divider
//! - [`LineFormatter`]: single-line machine-readable entries for files
//! - [`JsonFormatter`]: one JSON object per entry

use crate::core::config::LoggerConfig;
use crate::core::entry::LogEntry;
use crate::core::level::LogLevel;
use crate::core::timestamp::TimestampFormat;
use crate::redaction::Redactor;
use colored::Colorize;
use serde_json::Value;
use std::collections::HashMap;

/// Renders a level/message/timestamp/context tuple into a display string.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry, redactor: &Redactor) -> String;
}

/// Multi-line human-readable console blocks.
pub struct PrettyFormatter {
    colorize: bool,
    timestamp_format: TimestampFormat,
    level_colors: HashMap<LogLevel, colored::Color>,
    level_icons: HashMap<LogLevel, String>,
}

impl PrettyFormatter {
    const DIVIDER_WIDTH: usize = 60;

    pub fn new() -> Self {
        Self {
            colorize: true,
            timestamp_format: TimestampFormat::default(),
            level_colors: HashMap::new(),
            level_icons: HashMap::new(),
        }
    }

    /// Build a formatter honoring the config's colorize flag, clock style
    /// and per-level overrides.
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            colorize: config.colorize,
            timestamp_format: TimestampFormat::clock(config.use_12_hour_clock),
            level_colors: config.level_colors.clone(),
            level_icons: config.level_icons.clone(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn icon_for(&self, level: LogLevel) -> String {
        self.level_icons
            .get(&level)
            .cloned()
            .unwrap_or_else(|| level.icon().to_string())
    }

    fn color_for(&self, level: LogLevel) -> colored::Color {
        self.level_colors
            .get(&level)
            .copied()
            .unwrap_or_else(|| level.color_code())
    }

    fn context_line(key: &str, value: &Value) -> String {
        match value {
            Value::String(s) => format!("  {}: {}", key, s),
            Value::Object(_) | Value::Array(_) => {
                let pretty =
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                let indented = pretty.replace('\n', "\n  ");
                format!("  {}: {}", key, indented)
            }
            other => format!("  {}: {}", key, other),
        }
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PrettyFormatter {
    fn format(&self, entry: &LogEntry, redactor: &Redactor) -> String {
        let icon = self.icon_for(entry.level);
        let timestamp = self.timestamp_format.format(&entry.timestamp);

        let header = if self.colorize {
            let color = self.color_for(entry.level);
            format!(
                "{} {} {}",
                icon,
                entry.level.to_str().color(color).bold(),
                timestamp.dimmed()
            )
        } else {
            format!("{} {} {}", icon, entry.level.to_str(), timestamp)
        };

        let mut lines = vec![header, format!("  {}", redactor.scrub(&entry.message))];

        if let Some(ref id) = entry.correlation_id {
            lines.push(format!("  correlation_id: {}", id));
        }

        if let Some(ref context) = entry.context {
            if let Value::Object(map) = redactor.context_to_json(context) {
                for (key, value) in &map {
                    lines.push(Self::context_line(key, value));
                }
            }
        }

        let divider = "─".repeat(Self::DIVIDER_WIDTH);
        if self.colorize {
            lines.push(divider.dimmed().to_string());
        } else {
            lines.push(divider);
        }

        lines.join("\n")
    }
}

/// Single-line machine-readable entries:
/// `[<ISO-8601>] <LEVEL>: <message>` suffixed with `| <JSON context>` when
/// context is non-empty. Timestamps are always absolute ISO 8601.
pub struct LineFormatter;

impl LineFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for LineFormatter {
    fn format(&self, entry: &LogEntry, redactor: &Redactor) -> String {
        let timestamp = TimestampFormat::Iso8601.format(&entry.timestamp);
        let mut line = format!(
            "[{}] {}: {}",
            timestamp,
            entry.level.to_str(),
            redactor.scrub(&entry.message)
        );

        let mut context_json = match entry.context.as_ref() {
            Some(context) => redactor.context_to_json(context),
            None => Value::Object(serde_json::Map::new()),
        };
        if let Some(ref id) = entry.correlation_id {
            if let Value::Object(ref mut map) = context_json {
                map.insert("correlation_id".to_string(), Value::String(id.clone()));
            }
        }

        let has_context = matches!(&context_json, Value::Object(map) if !map.is_empty());
        if has_context {
            line.push_str(" | ");
            line.push_str(&context_json.to_string());
        }

        line
    }
}

/// One JSON object per entry: `{level, message, timestamp, ...context}`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry, redactor: &Redactor) -> String {
        let mut map = serde_json::Map::new();
        map.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        map.insert(
            "message".to_string(),
            Value::String(redactor.scrub(&entry.message)),
        );
        map.insert(
            "timestamp".to_string(),
            Value::String(TimestampFormat::Iso8601.format(&entry.timestamp)),
        );
        if let Some(ref id) = entry.correlation_id {
            map.insert("correlation_id".to_string(), Value::String(id.clone()));
        }
        if let Some(ref context) = entry.context {
            if let Value::Object(fields) = redactor.context_to_json(context) {
                for (key, value) in fields {
                    map.insert(key, value);
                }
            }
        }

        Value::Object(map).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::LogContext;
    use crate::redaction::SensitiveValue;

    fn entry_with_context(context: LogContext) -> LogEntry {
        LogEntry::new(LogLevel::Info, "Request completed".to_string()).with_context(context)
    }

    #[test]
    fn test_line_format_shape() {
        let entry = LogEntry::new(LogLevel::Warn, "disk almost full".to_string());
        let line = LineFormatter::new().format(&entry, &Redactor::new());

        assert!(line.starts_with('['));
        assert!(line.contains("] WARN: disk almost full"));
        assert!(!line.contains('|'));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_line_format_with_context() {
        let context = LogContext::new().with_field("user", "alice");
        let line = LineFormatter::new().format(&entry_with_context(context), &Redactor::new());

        assert!(line.contains(" | "));
        assert!(line.contains(r#""user":"alice""#));
    }

    #[test]
    fn test_json_format_round_trip() {
        let context = LogContext::new()
            .with_field("request_id", "abc-123")
            .with_field("latency_ms", 42);
        let entry = entry_with_context(context);

        let json = JsonFormatter::new().format(&entry, &Redactor::new());
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["message"], "Request completed");
        assert_eq!(
            parsed["timestamp"],
            TimestampFormat::Iso8601.format(&entry.timestamp)
        );
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
    }

    fn nested_details() -> crate::core::context::ContextValue {
        crate::core::context::ContextValue::Map(vec![(
            "port".to_string(),
            crate::core::context::ContextValue::Int(5432),
        )])
    }

    #[test]
    fn test_pretty_format_block() {
        let context = LogContext::new()
            .with_field("user", "alice")
            .with_field("details", nested_details());
        let entry = entry_with_context(context);

        let block = PrettyFormatter::new()
            .with_colors(false)
            .format(&entry, &Redactor::new());

        let lines: Vec<&str> = block.lines().collect();
        assert!(lines[0].contains("INFO"));
        assert_eq!(lines[1], "  Request completed");
        assert!(lines.iter().any(|l| l.starts_with("  user: alice")));
        // Nested objects render as indented JSON
        assert!(block.contains("\"port\": 5432"));
        assert!(lines.last().unwrap().starts_with('─'));
    }

    #[test]
    fn test_sensitive_never_rendered() {
        let context = LogContext::new().with_field(
            "password",
            SensitiveValue::with_placeholder("hunter2".to_string(), "[HIDDEN]"),
        );
        let entry = entry_with_context(context);
        let redactor = Redactor::new();

        for formatter in [
            Box::new(PrettyFormatter::new().with_colors(false)) as Box<dyn Formatter>,
            Box::new(LineFormatter::new()),
            Box::new(JsonFormatter::new()),
        ] {
            let rendered = formatter.format(&entry, &redactor);
            assert!(rendered.contains("[HIDDEN]"), "missing placeholder");
            assert!(!rendered.contains("hunter2"), "leaked secret");
        }
    }

    #[test]
    fn test_correlation_id_included() {
        let entry = crate::correlation::run_with_context(Some("op-1"), || {
            LogEntry::new(LogLevel::Info, "hello".to_string())
        });

        let line = LineFormatter::new().format(&entry, &Redactor::new());
        assert!(line.contains(r#""correlation_id":"op-1""#));

        let json = JsonFormatter::new().format(&entry, &Redactor::new());
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["correlation_id"], "op-1");
    }
}
