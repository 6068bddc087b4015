//! Query performance logging
//!
//! Records query executions in a fixed-capacity ring buffer, flags slow ones
//! through the owning [`Logger`], and computes aggregate statistics on
//! demand. The slow-query warning and the verbose per-query debug entry are
//! independent gates: a slow query under verbose logging emits both.

use crate::core::{ContextValue, LogContext, Logger};
use crate::correlation;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// One recorded query execution.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub params: Vec<ContextValue>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Configuration for [`QueryPerformanceLogger`].
#[derive(Debug, Clone)]
pub struct QueryLoggerConfig {
    /// Master switch; when false `log_query` is a complete no-op.
    pub enabled: bool,
    /// Queries at or above this duration emit a warning.
    pub slow_query_threshold_ms: u64,
    /// Emit a debug entry for every query, fast or slow.
    pub verbose: bool,
    /// Ring-buffer capacity; the oldest entry is evicted on overflow.
    pub capacity: usize,
}

impl Default for QueryLoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slow_query_threshold_ms: 100,
            verbose: false,
            capacity: 1000,
        }
    }
}

/// Aggregate statistics over the ring buffer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryStats {
    pub count: usize,
    pub slow_count: usize,
    pub mean_duration_ms: f64,
    pub max_duration_ms: u64,
    pub per_database: HashMap<String, DatabaseStats>,
}

/// Per-database breakdown inside [`QueryStats`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseStats {
    pub count: usize,
    pub mean_duration_ms: f64,
}

/// Records query executions and keeps the most recent ones for analysis.
pub struct QueryPerformanceLogger {
    logger: Arc<Logger>,
    config: QueryLoggerConfig,
    buffer: Mutex<VecDeque<QueryLogEntry>>,
}

impl QueryPerformanceLogger {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_config(logger, QueryLoggerConfig::default())
    }

    pub fn with_config(logger: Arc<Logger>, config: QueryLoggerConfig) -> Self {
        let capacity = config.capacity;
        Self {
            logger,
            config,
            buffer: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    pub fn config(&self) -> &QueryLoggerConfig {
        &self.config
    }

    /// Record one query execution.
    ///
    /// Disabled loggers do nothing at all. Otherwise the entry lands in the
    /// ring buffer, a warning is emitted when the duration reaches the
    /// slow-query threshold, and a debug entry is emitted when verbose
    /// logging is on. An explicit `correlation_id` (for example one carried
    /// across a process boundary) takes precedence; otherwise the active
    /// correlation scope, if any, is captured with the entry.
    pub fn log_query(
        &self,
        query: impl Into<String>,
        params: Vec<ContextValue>,
        duration_ms: u64,
        database: Option<&str>,
        correlation_id: Option<&str>,
    ) {
        if !self.config.enabled {
            return;
        }

        let entry = QueryLogEntry {
            query: query.into(),
            params,
            duration_ms,
            timestamp: Utc::now(),
            database: database.map(str::to_string),
            correlation_id: correlation_id
                .map(str::to_string)
                .or_else(|| correlation::current_store().map(|s| s.id)),
        };

        let is_slow = duration_ms >= self.config.slow_query_threshold_ms;

        if is_slow {
            self.logger.warn_with_context(
                format!("Slow query detected ({} ms)", duration_ms),
                self.query_context(&entry)
                    .with_field("threshold_ms", self.config.slow_query_threshold_ms as i64),
            );
        }

        if self.config.verbose {
            self.logger.debug_with_context(
                format!("Query executed ({} ms)", duration_ms),
                self.query_context(&entry),
            );
        }

        let mut buffer = self.buffer.lock();
        if buffer.len() >= self.config.capacity {
            buffer.pop_front();
        }
        buffer.push_back(entry);
    }

    fn query_context(&self, entry: &QueryLogEntry) -> LogContext {
        let mut context = LogContext::new()
            .with_field("query", entry.query.clone())
            .with_field("duration_ms", entry.duration_ms as i64);
        if !entry.params.is_empty() {
            context.add_field("params", ContextValue::List(entry.params.clone()));
        }
        if let Some(ref db) = entry.database {
            context.add_field("database", db.clone());
        }
        context
    }

    /// One-pass aggregate over the buffer. Empty buffers yield zeroed
    /// statistics rather than a division by zero.
    pub fn stats(&self) -> QueryStats {
        let buffer = self.buffer.lock();
        if buffer.is_empty() {
            return QueryStats::default();
        }

        let mut stats = QueryStats::default();
        let mut total: u64 = 0;
        let mut db_totals: HashMap<String, u64> = HashMap::new();

        for entry in buffer.iter() {
            stats.count += 1;
            total += entry.duration_ms;
            if entry.duration_ms >= self.config.slow_query_threshold_ms {
                stats.slow_count += 1;
            }
            stats.max_duration_ms = stats.max_duration_ms.max(entry.duration_ms);

            if let Some(ref db) = entry.database {
                let db_stats = stats.per_database.entry(db.clone()).or_default();
                db_stats.count += 1;
                *db_totals.entry(db.clone()).or_default() += entry.duration_ms;
            }
        }

        stats.mean_duration_ms = total as f64 / stats.count as f64;
        for (db, db_stats) in stats.per_database.iter_mut() {
            db_stats.mean_duration_ms = db_totals[db] as f64 / db_stats.count as f64;
        }

        stats
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<QueryLogEntry> {
        let buffer = self.buffer.lock();
        let skip = buffer.len().saturating_sub(n);
        buffer.iter().skip(skip).cloned().collect()
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Discard every buffered entry.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}
