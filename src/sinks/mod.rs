//! Output streams for the four levels
//!
//! The core never opens files itself. A [`SinkProvider`] hands it one
//! already-opened writer per level; the stock provider fans each one out to a
//! shared append-only file and the console.

pub mod console;
pub mod fanout;
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
pub use fanout::FanOut;
pub use file::DirectorySinkProvider;
pub use memory::MemorySink;

use crate::core::{LogLevel, Result};
use std::io::Write;

/// Writable destination of one level
pub type Sink = Box<dyn Write + Send>;

/// Supplies the writer each level's lines go to.
///
/// Called once per level when a logger is built. Providers may hand the same
/// underlying stream to several levels.
pub trait SinkProvider {
    fn open(&self, level: LogLevel) -> Result<Sink>;
}

/// Provider backed by a closure.
///
/// ```
/// use log4u::sinks::{FnSinkProvider, MemorySink};
/// use log4u::Log4u;
///
/// let buffer = MemorySink::new();
/// let sink_buffer = buffer.clone();
/// let logger = Log4u::builder()
///     .sink_provider(FnSinkProvider::new(move |_level| Ok(Box::new(sink_buffer.clone()))))
///     .build()
///     .expect("memory sinks always open");
/// ```
pub struct FnSinkProvider<F> {
    open: F,
}

impl<F> FnSinkProvider<F>
where
    F: Fn(LogLevel) -> Result<Sink>,
{
    pub fn new(open: F) -> Self {
        Self { open }
    }
}

impl<F> SinkProvider for FnSinkProvider<F>
where
    F: Fn(LogLevel) -> Result<Sink>,
{
    fn open(&self, level: LogLevel) -> Result<Sink> {
        (self.open)(level)
    }
}
