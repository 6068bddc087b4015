//! # logcore
//!
//! Structured logging core with leveled dispatch, pluggable transports,
//! correlation-context propagation and built-in sensitive-data redaction.
//!
//! ## Features
//!
//! - **Leveled dispatcher**: five ordered levels with zero-cost suppression
//!   below the configured minimum
//! - **Transports**: synchronous console output (pretty blocks or single
//!   lines) and a durable file transport with a FIFO queue, drain worker
//!   and explicit backpressure handling
//! - **Redaction**: `SensitiveValue<T>` wrappers render only as their
//!   placeholder, and credential-shaped strings are pattern-redacted at the
//!   formatting boundary for every transport
//! - **Correlation**: `run_with_context` scopes an operation id to a
//!   dynamic extent; every entry logged inside the scope carries it
//! - **Query performance logging**: ring-buffered query records with
//!   slow-query warnings and aggregate statistics
//!
//! No hidden global logger: construct a [`Logger`] at the application entry
//! point and inject it where needed.
//!
//! ## Quick Start
//!
//! ```rust
//! use logcore::prelude::*;
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Debug)
//!     .build();
//!
//! logger.info("Application started");
//! logger.warn_with_context(
//!     "Login failed",
//!     LogContext::new()
//!         .with_field("user", "alice")
//!         .with_field("attempts", 3),
//! );
//!
//! logger.cleanup();
//! ```

pub mod core;
pub mod correlation;
pub mod format;
pub mod macros;
pub mod query;
pub mod redaction;
pub mod transports;

pub use crate::core::{
    ConfigPatch, ContextValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Result, SensitiveApproval, TimestampFormat,
    Transport,
};
pub use crate::format::{Formatter, JsonFormatter, LineFormatter, PrettyFormatter};
pub use crate::query::{QueryLoggerConfig, QueryPerformanceLogger, QueryStats};
pub use crate::redaction::{Redactor, SensitiveValue};
pub use crate::transports::{ConsoleTransport, FileTransport};

/// Commonly used types, in one import
pub mod prelude {
    pub use crate::core::{
        ConfigPatch, ContextValue, LogContext, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        Result, SensitiveApproval, Transport,
    };
    pub use crate::correlation::run_with_context;
    pub use crate::query::{QueryLoggerConfig, QueryPerformanceLogger};
    pub use crate::redaction::SensitiveValue;
    pub use crate::transports::{ConsoleTransport, FileTransport};
}
