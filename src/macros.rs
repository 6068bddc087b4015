//! Convenience macros for logging with format arguments
//!
//! Every macro takes the logger explicitly; there is no process-wide
//! default instance to fall back to.

/// Log a message at the given level with format arguments
///
/// # Example
/// ```
/// use logcore::{log, Logger, LogLevel};
///
/// let logger = Logger::new();
/// log!(logger, LogLevel::Info, "processed {} items", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log($level, format!($($arg)*))
    };
}

/// Log a debug message with format arguments
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)*)
    };
}

/// Log an info message with format arguments
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)*)
    };
}

/// Log a warning message with format arguments
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)*)
    };
}

/// Log an error message with format arguments
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)*)
    };
}

/// Log a fatal message with format arguments
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Fatal, $($arg)*)
    };
}
