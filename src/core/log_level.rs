//! Log level definitions and the level gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record.
///
/// Ordered from least to most verbose: `Error < Warn < Info < Out`. A record
/// passes the gate when its level is less than or equal to the threshold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    #[default]
    Out = 3,
}

impl LogLevel {
    /// All levels, least verbose first
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Out,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Out => "OUT",
        }
    }

    /// Map a raw threshold value onto a level.
    ///
    /// Anything outside `0..=3` becomes [`LogLevel::Out`], the most verbose
    /// level, instead of being rejected.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            _ => LogLevel::Out,
        }
    }

    /// Like `parse`, but unrecognized names normalize to [`LogLevel::Out`]
    pub fn normalize_name(s: &str) -> Self {
        s.parse().unwrap_or(LogLevel::Out)
    }

    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Whether locations are resolved for this level
    pub fn tracks_location(self) -> bool {
        self != LogLevel::Out
    }

    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            LogLevel::Error => Some(Red),
            LogLevel::Warn => Some(Yellow),
            LogLevel::Info => Some(Blue),
            LogLevel::Out => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Level gate: whether a call at `level` is enqueued under `threshold`.
///
/// Error records are never gated.
#[inline]
pub fn should_emit(level: LogLevel, threshold: LogLevel) -> bool {
    level == LogLevel::Error || level <= threshold
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "OUT" => Ok(LogLevel::Out),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        LogLevel::normalize_name(&s)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}

impl From<u8> for LogLevel {
    fn from(raw: u8) -> Self {
        LogLevel::from_raw(raw)
    }
}
