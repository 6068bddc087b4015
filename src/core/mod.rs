//! Core logging functionality

pub mod approval;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod transport;

pub use approval::SensitiveApproval;
pub use config::{ConfigPatch, LoggerConfig};
pub use context::{ContextValue, LogContext};
pub use entry::LogEntry;
pub use error::{LoggerError, Result};
pub use level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
pub use transport::Transport;
