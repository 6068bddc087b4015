//! Console transport implementation

use crate::core::config::LoggerConfig;
use crate::core::{LogEntry, LogLevel, Result, Transport};
use crate::format::{Formatter, LineFormatter, PrettyFormatter};
use crate::redaction::Redactor;
use std::sync::Arc;

/// Synchronous terminal sink.
///
/// Renders immediately through its formatter; Error and Fatal entries go to
/// stderr, everything else to stdout. Colorization, icons and clock style
/// are per-instance configuration carried by the formatter.
pub struct ConsoleTransport {
    formatter: Arc<dyn Formatter>,
    redactor: Arc<Redactor>,
}

impl ConsoleTransport {
    /// Pretty colorized output with default settings.
    pub fn new(redactor: Arc<Redactor>) -> Self {
        Self {
            formatter: Arc::new(PrettyFormatter::new()),
            redactor,
        }
    }

    /// Build from config: the config's explicit formatter when one is set,
    /// otherwise pretty blocks when `config.pretty`, single-line output
    /// when not.
    pub fn from_config(config: &LoggerConfig, redactor: Arc<Redactor>) -> Self {
        let formatter: Arc<dyn Formatter> = match config.formatter {
            Some(ref formatter) => Arc::clone(formatter),
            None if config.pretty => Arc::new(PrettyFormatter::from_config(config)),
            None => Arc::new(LineFormatter::new()),
        };
        Self {
            formatter,
            redactor,
        }
    }

    /// Replace the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.formatter.format(entry, &self.redactor);

        // Route Error and Fatal levels to stderr, others to stdout
        match entry.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_transport_log() {
        let mut transport = ConsoleTransport::new(Arc::new(Redactor::new()));
        let entry = LogEntry::new(LogLevel::Info, "console test".to_string());
        assert!(transport.log(&entry).is_ok());
        assert!(transport.cleanup().is_ok());
    }

    #[test]
    fn test_from_config_plain() {
        let config = LoggerConfig {
            pretty: false,
            ..LoggerConfig::default()
        };
        let mut transport = ConsoleTransport::from_config(&config, Arc::new(Redactor::new()));
        let entry = LogEntry::new(LogLevel::Error, "to stderr".to_string());
        assert!(transport.log(&entry).is_ok());
    }
}
