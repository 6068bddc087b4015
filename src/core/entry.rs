//! Log entry structure

use super::context::LogContext;
use super::level::LogLevel;
use crate::correlation;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<LogContext>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Create an entry stamped with the current time and the active
    /// correlation scope, if any.
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            correlation_id: correlation::current_store().map(|s| s.id),
            context: None,
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }
}
