//! Error types for the logger

use super::log_level::LogLevel;

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

    /// Settings could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A level sink rejected a write or flush
    #[error("Sink write failed for {level} records: {source}")]
    SinkWrite {
        level: LogLevel,
        #[source]
        source: std::io::Error,
    },

    /// A level sink panicked while writing
    #[error("Sink panicked while writing {level} record: {message}")]
    SinkPanicked { level: LogLevel, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

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

    pub fn sink_write(level: LogLevel, source: std::io::Error) -> Self {
        LoggerError::SinkWrite { level, source }
    }

    pub fn sink_panicked(level: LogLevel, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            level,
            message: message.into(),
        }
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

    /// Whether this error came from a level sink on the write path
    pub fn is_sink_failure(&self) -> bool {
        matches!(
            self,
            LoggerError::SinkWrite { .. } | LoggerError::SinkPanicked { .. }
        )
    }
}
