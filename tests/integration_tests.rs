//! Integration tests covering the dispatcher, transports, redaction and
//! correlation working together

use logcore::prelude::*;
use logcore::transports::{LineSink, SinkStatus};
use logcore::{FileTransport, JsonFormatter, LogEntry, LogLevel, LoggerConfig, Redactor};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

/// Transport recording every entry it receives.
struct RecordingTransport {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingTransport {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                entries: Arc::clone(&entries),
            },
            entries,
        )
    }
}

impl Transport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}

#[test]
fn test_warn_level_logger_suppresses_info() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Warn)
        .transport(transport)
        .build();

    logger.info("x");
    logger.warn("y");

    let captured = entries.lock();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "y");
    assert_eq!(captured[0].level, LogLevel::Warn);
}

#[test]
fn test_configure_empty_patch_is_idempotent() {
    let (transport, _entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Info)
        .transport(transport)
        .build();

    let names_before = logger.transport_names();
    let count_before = logger.transport_count();

    logger.configure(ConfigPatch::new());
    logger.configure(ConfigPatch::new());

    assert_eq!(logger.transport_names(), names_before);
    assert_eq!(logger.transport_count(), count_before);
}

#[test]
fn test_sensitive_value_renders_placeholder_in_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("app.log");

    let mut file = FileTransport::new(&path, Arc::new(Redactor::new()));
    file.initialize().expect("initialize");
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(file)
        .build();

    let context = LogContext::new().with_field(
        "token",
        SensitiveValue::with_placeholder("secret".to_string(), "[HIDDEN]"),
    );
    logger.info_with_context("login attempt", context);
    logger.cleanup();

    let content = std::fs::read_to_string(&path).expect("read log");
    assert!(content.contains("[HIDDEN]"));
    assert!(!content.contains("secret"));
}

#[test]
fn test_pattern_redaction_scrubs_message_in_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("app.log");

    let mut file = FileTransport::new(&path, Arc::new(Redactor::new()));
    file.initialize().expect("initialize");
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(file)
        .build();

    logger.error(r#"auth failed for password="abc123""#);
    logger.cleanup();

    let content = std::fs::read_to_string(&path).expect("read log");
    assert!(content.contains("[REDACTED]"));
    assert!(!content.contains("abc123"));
}

#[test]
fn test_formatter_override_applies_to_built_transports() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("structured.log");

    let config = LoggerConfig {
        min_level: LogLevel::Debug,
        pretty: false,
        colorize: false,
        file_enabled: true,
        file_path: Some(path.clone()),
        formatter: Some(Arc::new(JsonFormatter::new())),
        ..LoggerConfig::default()
    };
    let logger = Logger::with_config(config);

    logger.info("structured entry");
    logger.cleanup();

    // The file transport renders through the override instead of its
    // default single-line format
    let content = std::fs::read_to_string(&path).expect("read log");
    let line = content.lines().next().expect("one entry");
    let parsed: serde_json::Value = serde_json::from_str(line).expect("json line");
    assert_eq!(parsed["message"], "structured entry");
    assert_eq!(parsed["level"], "INFO");
}

/// Sink that signals pressure after every line and counts drain waits.
struct PressuredSink {
    lines: Arc<Mutex<Vec<String>>>,
    drains: Arc<AtomicUsize>,
}

impl LineSink for PressuredSink {
    fn write_line(&mut self, line: &str) -> io::Result<SinkStatus> {
        self.lines.lock().push(line.to_string());
        Ok(SinkStatus::Pressured)
    }

    fn await_drain(&mut self) -> io::Result<()> {
        self.drains.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_backpressure_delivers_all_entries_in_order() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let drains = Arc::new(AtomicUsize::new(0));

    let mut transport = FileTransport::new("/unused.log", Arc::new(Redactor::new()));
    transport.start_with_sink(Box::new(PressuredSink {
        lines: Arc::clone(&lines),
        drains: Arc::clone(&drains),
    }));

    const N: usize = 100;
    for i in 0..N {
        let entry = LogEntry::new(LogLevel::Info, format!("entry {}", i));
        transport.log(&entry).expect("log");
    }
    transport.cleanup().expect("cleanup");

    let written = lines.lock();
    assert_eq!(written.len(), N);
    for (i, line) in written.iter().enumerate() {
        assert!(line.contains(&format!("entry {}", i)), "out of order at {}", i);
    }
    // Every Pressured signal was answered by a drain wait
    assert_eq!(drains.load(Ordering::SeqCst), N);
}

#[test]
fn test_correlation_nesting_shadows_and_restores() {
    run_with_context(Some("outer"), || {
        assert_eq!(logcore::correlation::current_id(), "outer");

        run_with_context(Some("inner"), || {
            assert_eq!(logcore::correlation::current_id(), "inner");
        });

        assert_eq!(logcore::correlation::current_id(), "outer");
    });
    assert_eq!(logcore::correlation::current_id(), "unknown");
}

#[test]
fn test_entries_carry_scope_correlation_id() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(transport)
        .build();

    run_with_context(Some("req-9"), || {
        logger.info("inside scope");
    });
    logger.info("outside scope");

    let captured = entries.lock();
    assert_eq!(captured[0].correlation_id.as_deref(), Some("req-9"));
    assert!(captured[1].correlation_id.is_none());
}

#[test]
fn test_slow_query_threshold_scenario() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Debug)
            .transport(transport)
            .build(),
    );
    let query_logger = QueryPerformanceLogger::new(Arc::clone(&logger));

    query_logger.log_query("SELECT * FROM big_table", vec![], 150, None, None);
    query_logger.log_query("SELECT 1", vec![], 50, None, None);

    let captured = entries.lock();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, LogLevel::Warn);

    drop(captured);
    let stats = query_logger.stats();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.slow_count, 1);
    assert_eq!(stats.max_duration_ms, 150);
}

#[test]
fn test_expired_approval_withholds_payload() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(transport)
        .build();

    let expired = SensitiveApproval::new("late audit", "secops")
        .expires_at(chrono::Utc::now() - chrono::Duration::minutes(5));
    let payload = LogContext::new().with_field("card_holder", "jane-doe-4242");
    logger.log_with_sensitive_data(LogLevel::Info, "card lookup", payload, &expired);

    let captured = entries.lock();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, LogLevel::Warn);
    assert!(captured[0].message.contains("rejected"));

    let rendered = serde_json::to_string(&captured[0]).unwrap();
    assert!(!rendered.contains("jane-doe-4242"));
    assert!(!rendered.contains("card_holder"));
}

#[test]
fn test_valid_approval_tags_context() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(transport)
        .build();

    let approval = SensitiveApproval::new("fraud case 77", "secops");
    let payload = LogContext::new().with_field("account", "acct-1");
    logger.log_with_sensitive_data(LogLevel::Info, "account lookup", payload, &approval);

    let captured = entries.lock();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].message.starts_with("[SENSITIVE]"));
    let context = captured[0].context.as_ref().unwrap();
    assert!(context.get("account").is_some());
    assert!(context.get("approval_reason").is_some());
    assert!(context.get("approved_by").is_some());
}

#[test]
fn test_cleanup_then_relog_reaches_no_transport() {
    let (transport, entries) = RecordingTransport::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .transport(transport)
        .build();

    logger.info("before");
    logger.cleanup();
    logger.info("after");

    assert_eq!(entries.lock().len(), 1);
    assert_eq!(logger.transport_count(), 0);
}
