//! Main logger implementation: level gate, context enrichment, fan-out

use super::{
    approval::SensitiveApproval,
    config::{ConfigPatch, LoggerConfig},
    context::LogContext,
    entry::LogEntry,
    level::LogLevel,
    metrics::LoggerMetrics,
    transport::Transport,
};
use crate::redaction::Redactor;
use crate::transports::{ConsoleTransport, FileTransport};
use parking_lot::RwLock;
use std::sync::Arc;

/// The public dispatcher: filters by level, enriches context, fans out to
/// every registered transport in registration order.
///
/// A logging call never throws into the caller: transport failures and
/// panics degrade to an `eprintln!` diagnostic while the remaining
/// transports continue to receive entries.
///
/// Construct and own an instance at the application entry point and inject
/// it into collaborators; there is deliberately no process-wide default
/// instance.
pub struct Logger {
    config: RwLock<LoggerConfig>,
    transports: RwLock<Vec<Box<dyn Transport>>>,
    redactor: Arc<Redactor>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with default configuration (pretty colorized console).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    /// Logger with an explicit configuration; transports are built from it.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        let redactor = Arc::new(Redactor::new());
        let transports = Self::build_transports(&config, &redactor);
        Self {
            config: RwLock::new(config),
            transports: RwLock::new(transports),
            redactor,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build the transport set a config describes.
    ///
    /// A file transport that fails to initialize is reported and skipped,
    /// so the logger degrades to console-only instead of crashing.
    fn build_transports(
        config: &LoggerConfig,
        redactor: &Arc<Redactor>,
    ) -> Vec<Box<dyn Transport>> {
        let mut transports: Vec<Box<dyn Transport>> = vec![Box::new(
            ConsoleTransport::from_config(config, Arc::clone(redactor)),
        )];

        if config.file_enabled {
            match config.file_path {
                Some(ref path) => {
                    let mut file = FileTransport::new(path, Arc::clone(redactor));
                    if let Some(ref formatter) = config.formatter {
                        file = file.with_formatter(Arc::clone(formatter));
                    }
                    match file.initialize() {
                        Ok(()) => transports.push(Box::new(file)),
                        Err(e) => eprintln!(
                            "[LOGGER WARNING] File logging unavailable ({}); \
                             falling back to console only",
                            e
                        ),
                    }
                }
                None => eprintln!(
                    "[LOGGER WARNING] File logging enabled without a path; \
                     falling back to console only"
                ),
            }
        }

        transports
    }

    /// Dispatch one entry to every transport with per-transport panic
    /// isolation: one failing transport never blocks the others.
    fn dispatch(&self, entry: LogEntry) {
        let mut transports = self.transports.write();
        let mut has_error = false;

        for transport in transports.iter_mut() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                transport.log(&entry)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Transport '{}' failed: {}", transport.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Transport '{}' panicked: {}. \
                         Other transports continue to function.",
                        transport.name(),
                        panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_transport_error();
        }
        self.metrics.record_logged();
    }

    /// Log a message at a level with no structured context.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        // Gate before any other work so suppressed calls stay free
        if level < self.config.read().min_level {
            self.metrics.record_suppressed();
            return;
        }

        self.dispatch(LogEntry::new(level, message.into()));
    }

    /// Log with structured context fields.
    ///
    /// Below-threshold calls return before any context processing. Captured
    /// error values keep their stack only when configured to.
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        let include_stack = {
            let config = self.config.read();
            if level < config.min_level {
                self.metrics.record_suppressed();
                return;
            }
            config.include_stack
        };

        let mut context = context;
        if !include_stack {
            context.strip_error_stacks();
        }

        self.dispatch(LogEntry::new(level, message.into()).with_context(context));
    }

    /// Explicit path for logging a payload that contains sensitive data.
    ///
    /// An invalid approval (empty reason or approver, or a past expiry)
    /// withholds the payload entirely and emits a warning-level audit entry
    /// that never carries any fragment of it. A valid approval tags the
    /// context with the approval metadata and prefixes the message so the
    /// exceptional path stays visually distinct. Redaction still applies at
    /// the formatting boundary either way.
    pub fn log_with_sensitive_data(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        data: LogContext,
        approval: &SensitiveApproval,
    ) {
        match approval.validate() {
            Err(why) => {
                self.metrics.record_rejected_approval();
                drop(data);

                let audit = LogContext::new()
                    .with_field("audit", true)
                    .with_field("rejection_reason", why)
                    .with_field("requested_level", level.to_str());
                self.log_with_context(
                    LogLevel::Warn,
                    format!("Sensitive data logging rejected: {}", why),
                    audit,
                );
            }
            Ok(()) => {
                let mut context = data;
                context.add_field("approval_reason", approval.reason.clone());
                context.add_field("approved_by", approval.approved_by.clone());
                self.log_with_context(level, format!("[SENSITIVE] {}", message.into()), context);
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn debug_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Debug, message, context);
    }

    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    pub fn warn_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Warn, message, context);
    }

    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }

    /// Merge a partial config into the live one.
    ///
    /// When an option affecting transport construction actually changes
    /// (file path or flag, pretty, colorize, clock, level overrides, or an
    /// explicit transport list), the transport set is torn down and
    /// rebuilt, so the logger never holds stale transports. An empty patch
    /// leaves the transports untouched.
    pub fn configure(&self, mut patch: ConfigPatch) {
        let explicit = patch.transports.take();
        let rebuild = self.config.write().apply(&patch);

        if let Some(list) = explicit {
            self.teardown_transports();
            *self.transports.write() = list;
        } else if rebuild {
            self.teardown_transports();
            let config = self.config.read();
            *self.transports.write() = Self::build_transports(&config, &self.redactor);
        }
    }

    /// Sugar for `configure` with only a level change.
    pub fn set_level(&self, level: LogLevel) {
        self.configure(ConfigPatch::new().min_level(level));
    }

    /// Register an additional transport without rebuilding the others.
    pub fn add_transport(&self, transport: Box<dyn Transport>) {
        self.transports.write().push(transport);
    }

    /// Remove the last-registered transport with this name, running its
    /// cleanup hook. Returns whether a match was found.
    pub fn remove_transport(&self, name: &str) -> bool {
        let mut transports = self.transports.write();
        let position = transports.iter().rposition(|t| t.name() == name);
        match position {
            Some(idx) => {
                let mut removed = transports.remove(idx);
                if let Err(e) = removed.cleanup() {
                    eprintln!(
                        "[LOGGER ERROR] Transport '{}' cleanup failed: {}",
                        name, e
                    );
                }
                true
            }
            None => false,
        }
    }

    /// Flush and close every transport, then empty the list.
    ///
    /// Required before process exit when file transports are active;
    /// otherwise queued writes may be lost.
    pub fn cleanup(&self) {
        self.teardown_transports();
    }

    fn teardown_transports(&self) {
        let mut transports = self.transports.write();
        for transport in transports.iter_mut() {
            if let Err(e) = transport.cleanup() {
                eprintln!(
                    "[LOGGER ERROR] Transport '{}' cleanup failed: {}",
                    transport.name(),
                    e
                );
            }
        }
        transports.clear();
    }

    /// Number of registered transports.
    pub fn transport_count(&self) -> usize {
        self.transports.read().len()
    }

    /// Registered transport names in order.
    pub fn transport_names(&self) -> Vec<String> {
        self.transports
            .read()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Current minimum level.
    pub fn min_level(&self) -> LogLevel {
        self.config.read().min_level
    }

    /// The redactor shared with every built transport.
    pub fn redactor(&self) -> &Arc<Redactor> {
        &self.redactor
    }

    /// Dispatcher metrics for observability.
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Best-effort orderly shutdown for anyone who skipped cleanup()
        self.teardown_transports();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logcore::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .build();
/// logger.info("ready");
/// logger.cleanup();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    transports: Option<Vec<Box<dyn Transport>>>,
    redactor: Option<Arc<Redactor>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            transports: None,
            redactor: None,
        }
    }

    /// Start from an explicit configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Enable file output to a path
    #[must_use = "builder methods return a new value"]
    pub fn file_output(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.file_enabled = true;
        self.config.file_path = Some(path.into());
        self
    }

    /// Apply an explicit formatter to every transport built from the config
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: crate::format::Formatter + 'static>(mut self, formatter: F) -> Self {
        self.config.formatter = Some(Arc::new(formatter));
        self
    }

    /// Use an explicit transport list instead of building from the config
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports
            .get_or_insert_with(Vec::new)
            .push(Box::new(transport));
        self
    }

    /// Replace the default redactor
    #[must_use = "builder methods return a new value"]
    pub fn redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = Some(Arc::new(redactor));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let redactor = self.redactor.unwrap_or_else(|| Arc::new(Redactor::new()));
        let transports = match self.transports {
            Some(list) => list,
            None => Logger::build_transports(&self.config, &redactor),
        };
        Logger {
            config: RwLock::new(self.config),
            transports: RwLock::new(transports),
            redactor,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
