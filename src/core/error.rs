//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Transport failed to deliver an entry
    #[error("Transport '{name}' error: {message}")]
    TransportError { name: String, message: String },

    /// Transport used before a successful initialize()
    #[error("Transport '{name}' not initialized")]
    NotInitialized { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Failed to enqueue an entry for the write worker
    #[error("Failed to send log entry to write worker")]
    ChannelSendError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a transport error
    pub fn transport(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a not-initialized error
    pub fn not_initialized(name: impl Into<String>) -> Self {
        LoggerError::NotInitialized { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::transport("file", "disk full");
        assert!(matches!(err, LoggerError::TransportError { .. }));

        let err = LoggerError::config("FileTransport", "empty path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::transport("file", "disk full");
        assert_eq!(err.to_string(), "Transport 'file' error: disk full");

        let err = LoggerError::not_initialized("file");
        assert_eq!(err.to_string(), "Transport 'file' not initialized");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
    }
}
