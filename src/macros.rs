//! Logging macros.
//!
//! Each level has a line macro (operands joined by spaces, like a print of a
//! list of values) and a format macro (like `format!`). Without a leading
//! `logger;` argument they write through the process-wide default logger.
//!
//! # Examples
//!
//! ```no_run
//! use log4u::{errorf, info, out, warn};
//!
//! out!("service", "starting");
//! info!("listening on port", 8080);
//! warn!("slow request:", 1.5, "s");
//! errorf!("connection {} reset by peer", 17);
//! log4u::wait();
//! ```
//!
//! With an explicit logger:
//!
//! ```
//! use log4u::sinks::{FnSinkProvider, MemorySink};
//! use log4u::{infof, Log4u};
//! use std::time::Duration;
//!
//! let buffer = MemorySink::new();
//! let sink = buffer.clone();
//! let logger = Log4u::builder()
//!     .colors(false)
//!     .drain_warmup(Duration::ZERO)
//!     .sink_provider(FnSinkProvider::new(move |_| Ok(Box::new(sink.clone()))))
//!     .build()
//!     .unwrap();
//!
//! infof!(logger; "processed {} items", 100);
//! logger.wait();
//! assert!(buffer.contents().ends_with("INFO processed 100 items\n"));
//! ```

/// Line variant at an explicit level
#[macro_export]
macro_rules! log_line {
    ($logger:expr; $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_line($level, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Format variant at an explicit level
#[macro_export]
macro_rules! log_fmt {
    ($logger:expr; $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+))
    };
}

/// `OUT` line: no header, operands joined by spaces
#[macro_export]
macro_rules! out {
    ($logger:expr; $($arg:expr),* $(,)?) => {
        $crate::log_line!($logger; $crate::LogLevel::Out $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::global::out(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `OUT` line from a format string
#[macro_export]
macro_rules! outf {
    ($logger:expr; $($arg:tt)+) => {
        $crate::log_fmt!($logger; $crate::LogLevel::Out, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::global::outf(format_args!($($arg)+))
    };
}

/// `INFO` line
#[macro_export]
macro_rules! info {
    ($logger:expr; $($arg:expr),* $(,)?) => {
        $crate::log_line!($logger; $crate::LogLevel::Info $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::global::info(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `INFO` line from a format string
#[macro_export]
macro_rules! infof {
    ($logger:expr; $($arg:tt)+) => {
        $crate::log_fmt!($logger; $crate::LogLevel::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::global::infof(format_args!($($arg)+))
    };
}

/// `WARN` line
#[macro_export]
macro_rules! warn {
    ($logger:expr; $($arg:expr),* $(,)?) => {
        $crate::log_line!($logger; $crate::LogLevel::Warn $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::global::warn(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `WARN` line from a format string
#[macro_export]
macro_rules! warnf {
    ($logger:expr; $($arg:tt)+) => {
        $crate::log_fmt!($logger; $crate::LogLevel::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::global::warnf(format_args!($($arg)+))
    };
}

/// `ERROR` line, emitted whatever the threshold
#[macro_export]
macro_rules! error {
    ($logger:expr; $($arg:expr),* $(,)?) => {
        $crate::log_line!($logger; $crate::LogLevel::Error $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::global::error(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `ERROR` line from a format string
#[macro_export]
macro_rules! errorf {
    ($logger:expr; $($arg:tt)+) => {
        $crate::log_fmt!($logger; $crate::LogLevel::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::global::errorf(format_args!($($arg)+))
    };
}
