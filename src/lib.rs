//! # log4u
//!
//! An asynchronous leveled logger. Calls are gated by a verbosity threshold,
//! rendered on the calling thread and queued; a single background thread
//! writes them, in order, to a file and the console with a header carrying
//! the date, time, source location and a colored level tag.
//!
//! ## Features
//!
//! - **Four levels**: `ERROR`, `WARN`, `INFO` and header-less `OUT`
//! - **Ordered**: one consumer writes records in queue order
//! - **Backpressure**: a full queue blocks producers instead of dropping lines
//! - **Fail fast**: a broken sink terminates the process
//!
//! ```no_run
//! use log4u::{info, infof, LogLevel};
//!
//! log4u::set_level(LogLevel::Info);
//! info!("server started on port", 8080);
//! infof!("{} workers ready", 4);
//! log4u::wait();
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Flags, LevelFormat, Log4u, Log4uBuilder, LogLevel, LoggerError, LoggerMetrics,
        LoggerSettings, Result,
    };
    pub use crate::sinks::{DirectorySinkProvider, FnSinkProvider, MemorySink, SinkProvider};
}

pub use crate::core::{
    exit_process, install_panic_hook, panic_hook_installed, render, should_emit, CallSite,
    FatalHandler, Flags, LevelFormat, Log4u, Log4uBuilder, LogLevel, LogRecord, LoggerError,
    LoggerMetrics, LoggerSettings, Result, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use global::{inject, reset, set_default, set_level, set_level_raw, wait};
