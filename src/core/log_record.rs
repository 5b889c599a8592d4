//! Log record structure

use super::caller::CallSite;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};

/// One pending message.
///
/// The body is rendered before the record is queued, so nothing borrowed from
/// the caller outlives the logging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub file: String,
    pub line: u32,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(level: LogLevel, site: CallSite, body: String) -> Self {
        Self {
            level,
            file: site.file,
            line: site.line,
            body,
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Join operands with single spaces and end the line.
///
/// ```
/// use log4u::core::log_record::line_body;
///
/// assert_eq!(line_body(&[&"listening on", &8080]), "listening on 8080\n");
/// assert_eq!(line_body(&[]), "\n");
/// ```
pub fn line_body(args: &[&dyn fmt::Display]) -> String {
    let mut body = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            body.push(' ');
        }
        // writing into a String cannot fail
        let _ = write!(body, "{}", arg);
    }
    body.push('\n');
    body
}

/// Render a format-string body; no newline is added here
pub fn format_body(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(s) => s.to_string(),
        None => fmt::format(args),
    }
}
