//! The single background consumer
//!
//! Dequeues records in FIFO order and writes each one through the format and
//! sink of its level. A failed write is fatal: the loop stops, flushes what it
//! can and runs the fatal handler, which by default exits the process.

use super::error::{LoggerError, Result};
use super::formatter::LevelFormat;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use crate::sinks::Sink;
use crossbeam_channel::Receiver;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Action run once when a sink fails
pub type FatalHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Default fatal action: report on stderr and terminate with status 1
pub fn exit_process(err: &LoggerError) {
    eprintln!(
        "[LOG4U FATAL] {}. Log output can no longer be trusted, terminating process.",
        err
    );
    std::process::exit(1);
}

/// State shared between the producers and the consumer
pub(crate) struct Shared {
    pub(crate) threshold: AtomicU8,
    pub(crate) metrics: LoggerMetrics,
    pub(crate) stopped: AtomicBool,
}

impl Shared {
    pub(crate) fn new(threshold: LogLevel) -> Self {
        Self {
            threshold: AtomicU8::new(threshold.as_raw()),
            metrics: LoggerMetrics::new(),
            stopped: AtomicBool::new(false),
        }
    }

    pub(crate) fn threshold(&self) -> LogLevel {
        LogLevel::from_raw(self.threshold.load(Ordering::Relaxed))
    }

    pub(crate) fn set_threshold(&self, level: LogLevel) {
        self.threshold.store(level.as_raw(), Ordering::Relaxed);
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Format and stream of one level, with a reusable line buffer
pub(crate) struct LevelSink {
    level: LogLevel,
    format: LevelFormat,
    writer: Sink,
    buf: Vec<u8>,
}

impl LevelSink {
    pub(crate) fn new(level: LogLevel, format: LevelFormat, writer: Sink) -> Self {
        Self {
            level,
            format,
            writer,
            buf: Vec::with_capacity(256),
        }
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.format.render_into(
            &mut self.buf,
            &record.timestamp,
            &record.file,
            record.line,
            &record.body,
        );
        let level = self.level;
        let writer = &mut self.writer;
        let buf = &self.buf;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            writer.write_all(buf)?;
            writer.flush()
        }));
        match outcome {
            Ok(result) => result.map_err(|e| LoggerError::sink_write(level, e)),
            Err(panic_info) => Err(LoggerError::sink_panicked(level, panic_message(&*panic_info))),
        }
    }

    fn flush(&mut self) -> Result<()> {
        let level = self.level;
        let writer = &mut self.writer;
        match panic::catch_unwind(AssertUnwindSafe(|| writer.flush())) {
            Ok(result) => result.map_err(|e| LoggerError::sink_write(level, e)),
            Err(panic_info) => Err(LoggerError::sink_panicked(level, panic_message(&*panic_info))),
        }
    }
}

/// The four level sinks, indexed by level
pub(crate) struct Dispatcher {
    sinks: [LevelSink; 4],
}

impl Dispatcher {
    pub(crate) fn new(sinks: [LevelSink; 4]) -> Self {
        Self { sinks }
    }

    pub(crate) fn dispatch(&mut self, record: &LogRecord) -> Result<()> {
        self.sinks[record.level.index()].append(record)
    }

    /// Flush every sink, reporting the first failure
    pub(crate) fn flush_all(&mut self) -> Result<()> {
        let mut first_err = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Consume until the queue closes or a write fails
pub(crate) fn run(
    receiver: Receiver<LogRecord>,
    mut dispatcher: Dispatcher,
    shared: Arc<Shared>,
    on_fatal: FatalHandler,
) {
    loop {
        let record = match receiver.recv() {
            Ok(record) => record,
            Err(_) => break,
        };
        if let Err(err) = dispatcher.dispatch(&record) {
            drop(receiver);
            // best effort, the failing sink may well fail again
            let _ = dispatcher.flush_all();
            on_fatal(&err);
            shared.stopped.store(true, Ordering::Release);
            return;
        }
        shared.metrics.record_written();
    }

    if let Err(e) = dispatcher.flush_all() {
        eprintln!("[LOG4U ERROR] Failed to flush sinks on shutdown: {}", e);
    }
    shared.stopped.store(true, Ordering::Release);
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
