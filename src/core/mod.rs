//! Core logger types

pub mod caller;
pub mod config;
pub mod consumer;
pub mod error;
pub mod flags;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;

pub use caller::{install_panic_hook, panic_hook_installed, CallSite};
pub use config::{LoggerSettings, DEFAULT_DRAIN_WARMUP, DEFAULT_QUEUE_CAPACITY};
pub use consumer::{exit_process, FatalHandler};
pub use error::{LoggerError, Result};
pub use flags::Flags;
pub use formatter::{level_tag, render, LevelFormat};
pub use log_level::{should_emit, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Log4u, Log4uBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
