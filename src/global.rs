//! Process-wide default logger
//!
//! Free functions and the logging macros write through a default [`Log4u`].
//! It is created on first use with the stock sinks (`./log/log4u.log` plus
//! stdout) and can be replaced or reset, which tests rely on.

use crate::core::log_record::{format_body, line_body};
use crate::core::{Log4u, LogLevel, Result};
use crate::sinks::{ConsoleSink, FnSinkProvider};
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

static DEFAULT: RwLock<Option<Arc<Log4u>>> = parking_lot::const_rwlock(None);

/// The default logger, created on first use.
///
/// If the log file cannot be opened the default falls back to console-only
/// output and says so on stderr.
pub fn inject() -> Result<Arc<Log4u>> {
    if let Some(logger) = DEFAULT.read().as_ref() {
        return Ok(Arc::clone(logger));
    }

    let mut slot = DEFAULT.write();
    if let Some(logger) = slot.as_ref() {
        return Ok(Arc::clone(logger));
    }
    let logger = Arc::new(build_default()?);
    *slot = Some(Arc::clone(&logger));
    Ok(logger)
}

fn build_default() -> Result<Log4u> {
    match Log4u::new() {
        Ok(logger) => Ok(logger),
        Err(e) => {
            eprintln!("[LOG4U WARNING] {}. Falling back to console-only logging.", e);
            Log4u::builder()
                .sink_provider(FnSinkProvider::new(|_| Ok(Box::new(ConsoleSink::new()))))
                .build()
        }
    }
}

/// Install `logger` as the default, returning the previous one
pub fn set_default(logger: Log4u) -> Option<Arc<Log4u>> {
    DEFAULT.write().replace(Arc::new(logger))
}

/// Remove the default; the next call creates a fresh one.
///
/// The removed logger drains and stops once its last handle is dropped.
pub fn reset() -> Option<Arc<Log4u>> {
    DEFAULT.write().take()
}

/// Set the threshold of the default logger
pub fn set_level(level: LogLevel) {
    with_default(|logger| logger.set_level(level));
}

/// Set the threshold from a raw value; out-of-range values mean `OUT`
pub fn set_level_raw(raw: u8) {
    with_default(|logger| logger.set_level_raw(raw));
}

/// Drain the default logger, see [`Log4u::wait`]
pub fn wait() {
    with_default(|logger| logger.wait());
}

fn with_default(f: impl FnOnce(&Log4u)) {
    match inject() {
        Ok(logger) => f(&logger),
        Err(e) => eprintln!("[LOG4U ERROR] Default logger unavailable: {}", e),
    }
}

#[track_caller]
fn line_at(level: LogLevel, args: &[&dyn fmt::Display]) {
    let location = Location::caller();
    with_default(|logger| logger.log_at(level, location, || line_body(args)));
}

#[track_caller]
fn fmt_at(level: LogLevel, args: fmt::Arguments<'_>) {
    let location = Location::caller();
    with_default(|logger| logger.log_at(level, location, || format_body(args)));
}

#[track_caller]
pub fn out(args: &[&dyn fmt::Display]) {
    line_at(LogLevel::Out, args);
}

#[track_caller]
pub fn outf(args: fmt::Arguments<'_>) {
    fmt_at(LogLevel::Out, args);
}

#[track_caller]
pub fn info(args: &[&dyn fmt::Display]) {
    line_at(LogLevel::Info, args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    fmt_at(LogLevel::Info, args);
}

#[track_caller]
pub fn warn(args: &[&dyn fmt::Display]) {
    line_at(LogLevel::Warn, args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    fmt_at(LogLevel::Warn, args);
}

#[track_caller]
pub fn error(args: &[&dyn fmt::Display]) {
    line_at(LogLevel::Error, args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    fmt_at(LogLevel::Error, args);
}
